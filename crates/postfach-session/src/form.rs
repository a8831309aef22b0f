//! HTML form extraction and submission data

use scraper::{ElementRef, Selector};
use url::Url;

use crate::page::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

impl FormMethod {
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some(method) if method.trim().eq_ignore_ascii_case("post") => FormMethod::Post,
            _ => FormMethod::Get,
        }
    }
}

/// A filled-in form, ready to be sent through a `Portal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub action: Url,
    pub method: FormMethod,
    /// Field name/value pairs in document order
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    /// Find the form on `page` that contains an input named `field` and
    /// collect its current values.
    pub fn from_page(page: &Page, field: &str) -> Option<Self> {
        let form_sel = Selector::parse("form").ok()?;
        let input_sel = Selector::parse("input[name]").ok()?;
        let doc = page.html();

        let form = doc.select(&form_sel).find(|form| {
            form.select(&input_sel)
                .any(|input| input.value().attr("name") == Some(field))
        })?;

        let action = match form.value().attr("action").map(str::trim) {
            Some(action) if !action.is_empty() => page.url.join(action).ok()?,
            _ => page.url.clone(),
        };

        let mut fields = Vec::new();
        let mut has_submit = false;
        for input in form.select(&input_sel) {
            if let Some(pair) = field_value(&input, &mut has_submit) {
                fields.push(pair);
            }
        }

        Some(Self {
            action,
            method: FormMethod::from_attr(form.value().attr("method")),
            fields,
        })
    }

    /// Set a field, replacing an existing value or appending a new field
    pub fn set_field(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(field) => field.1 = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Value an input contributes to a submission, mirroring what a browser
/// sends when the first submit button is pressed.
fn field_value(input: &ElementRef<'_>, has_submit: &mut bool) -> Option<(String, String)> {
    let el = input.value();
    let name = el.attr("name")?.to_string();
    let value = el.attr("value").unwrap_or_default().to_string();
    let kind = el.attr("type").unwrap_or("text").to_ascii_lowercase();

    match kind.as_str() {
        "checkbox" | "radio" if el.attr("checked").is_none() => None,
        "button" | "reset" | "image" | "file" => None,
        "submit" => {
            if *has_submit {
                None
            } else {
                *has_submit = true;
                Some((name, value))
            }
        }
        _ => Some((name, value)),
    }
}
