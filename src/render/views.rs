//! Landing page, list views, add/edit forms, and the missing-resource page.

use super::{escape, layout, Banner, PageContext};
use crate::model::{EntityDescriptor, FieldValues, Record};

/// Which form is being shown; decides the title and the submit URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

pub fn index_page(ctx: &PageContext, entities: &[&EntityDescriptor]) -> String {
    let items: String = entities
        .iter()
        .map(|e| {
            format!(
                "<li><a href=\"/{seg}\">{label}</a> (<a href=\"/{seg}/add\">add</a>)</li>\n",
                seg = e.path_segment,
                label = escape(e.label)
            )
        })
        .collect();
    layout(ctx, "IT Asset Inventory", None, &format!("<ul>\n{}</ul>\n", items))
}

pub fn list_page(ctx: &PageContext, entity: &EntityDescriptor, records: &[Record], banner: Option<&Banner>) -> String {
    let mut body = format!(
        "<p><a href=\"/{}/add\">Add {}</a></p>\n<table>\n<thead><tr><th>ID</th>",
        entity.path_segment,
        escape(entity.label)
    );
    for f in entity.fields {
        body.push_str(&format!("<th>{}</th>", escape(f.label)));
    }
    body.push_str("<th>Actions</th></tr></thead>\n<tbody>\n");
    for rec in records {
        body.push_str(&format!("<tr><td>{}</td>", rec.id));
        for f in entity.fields {
            body.push_str(&format!("<td>{}</td>", escape(rec.get(f.name))));
        }
        body.push_str(&format!(
            "<td><a href=\"/{seg}/edit/{id}\">Edit</a> \
             <form method=\"post\" action=\"/{seg}/delete/{id}\" style=\"display:inline\">\
             <button type=\"submit\">Delete</button></form></td></tr>\n",
            seg = entity.path_segment,
            id = rec.id
        ));
    }
    body.push_str("</tbody>\n</table>\n");
    layout(ctx, entity.label, banner, &body)
}

pub fn form_page(
    ctx: &PageContext,
    entity: &EntityDescriptor,
    mode: FormMode,
    values: Option<&FieldValues>,
    banner: Option<&Banner>,
) -> String {
    let (title, action) = match mode {
        FormMode::Add => (
            format!("Add {}", entity.label),
            format!("/{}/add", entity.path_segment),
        ),
        FormMode::Edit(id) => (
            format!("Edit {}", entity.label),
            format!("/{}/edit/{}", entity.path_segment, id),
        ),
    };
    let mut body = format!("<form method=\"post\" action=\"{}\">\n", escape(&action));
    for f in entity.fields {
        let value = values
            .and_then(|v| v.get(f.name))
            .and_then(|v| v.as_deref())
            .unwrap_or("");
        body.push_str(&format!(
            "<p><label for=\"{name}\">{label}</label> \
             <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\"{required}></p>\n",
            name = f.name,
            label = escape(f.label),
            value = escape(value),
            required = if f.required { " required" } else { "" },
        ));
    }
    body.push_str(&format!(
        "<p><button type=\"submit\">Save</button> <a href=\"/{}\">Cancel</a></p>\n</form>\n",
        entity.path_segment
    ));
    layout(ctx, &title, banner, &body)
}

pub fn not_found_page(ctx: &PageContext, what: &str) -> String {
    let body = format!(
        "<p>The requested resource was not found: {}</p>\n<p><a href=\"/\">Back to inventory</a></p>\n",
        escape(what)
    );
    layout(ctx, "Not Found", None, &body)
}

/// Store failure with nothing else to show, e.g. the list query itself failed.
pub fn error_page(ctx: &PageContext, message: &str) -> String {
    let banner = Banner::danger(message);
    layout(ctx, "Error", Some(&banner), "<p><a href=\"/\">Back to inventory</a></p>\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{COMPUTER_SYSTEM, ROUTER};

    fn router_record() -> Record {
        let mut values = ROUTER.extract(&Default::default());
        values.insert("router_name".into(), Some("R<1>".into()));
        Record { id: 3, values }
    }

    #[test]
    fn list_renders_every_field_and_actions() {
        let html = list_page(&PageContext::now(), &ROUTER, &[router_record()], None);
        for f in ROUTER.fields {
            assert!(html.contains(&format!("<th>{}</th>", f.label)), "missing header {}", f.name);
        }
        assert!(html.contains("R&lt;1&gt;"));
        assert!(html.contains("/router_info/edit/3"));
        assert!(html.contains("action=\"/router_info/delete/3\""));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let rec = router_record();
        let html = form_page(&PageContext::now(), &ROUTER, FormMode::Edit(3), Some(&rec.values), None);
        assert!(html.contains("Edit Router Information"));
        assert!(html.contains("action=\"/router_info/edit/3\""));
        assert!(html.contains("name=\"router_name\" value=\"R&lt;1&gt;\""));
    }

    #[test]
    fn add_form_marks_required_input() {
        let html = form_page(&PageContext::now(), &COMPUTER_SYSTEM, FormMode::Add, None, None);
        assert!(html.contains("Add System Information"));
        assert!(html.contains("name=\"host_name\" value=\"\" required>"));
        assert!(html.contains("name=\"floor\" value=\"\">"));
    }
}
