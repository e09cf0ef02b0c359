use askama::Template;

use crate::application::dashboard::FormState;
use crate::domain::draft::DraftField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub heading: &'static str,
    pub fields: Vec<FieldView>,
    pub submit_label: &'static str,
    pub saving: bool,
}

impl FormView {
    pub fn new(form: &FormState, saving: bool) -> Self {
        let (heading, idle_label) = if form.is_edit() {
            ("Edit Product", "Update Product")
        } else {
            ("Add New Product", "Add Product")
        };

        Self {
            heading,
            fields: DraftField::ALL
                .into_iter()
                .map(|field| FieldView {
                    name: field.as_str(),
                    label: field.label(),
                    value: form.draft.get(field).to_string(),
                    placeholder: field.placeholder(),
                })
                .collect(),
            submit_label: if saving { "Saving..." } else { idle_label },
            saving,
        }
    }
}

#[derive(Template)]
#[template(path = "form.txt")]
pub struct FormTemplate<'a> {
    pub view: &'a FormView,
}

#[cfg(test)]
mod tests {
    use crate::domain::draft::ProductDraft;

    use super::*;

    #[test]
    fn add_form_labels() {
        let form = FormState {
            editing: None,
            draft: ProductDraft::default(),
        };
        let view = FormView::new(&form, false);

        assert_eq!(view.heading, "Add New Product");
        assert_eq!(view.submit_label, "Add Product");
        assert_eq!(view.fields.len(), 5);
        assert_eq!(view.fields[1].placeholder, "0.00");
    }

    #[test]
    fn saving_label_replaces_submit() {
        let form = FormState {
            editing: None,
            draft: ProductDraft::default(),
        };
        assert_eq!(FormView::new(&form, true).submit_label, "Saving...");
    }
}
