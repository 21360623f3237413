//! Document assembler.
//!
//! Collects generated fragments into ordered head and body lists and
//! renders the final document in one pass.

use crate::codegen_html::Fragment;
use crate::options::CompileOptions;
use crate::parser::{Declaration, Placement};

/// The document being built for one compile.
#[derive(Debug)]
pub struct Document<'a> {
    options: &'a CompileOptions,
    title: &'a str,
    mobile: bool,
    declarations: &'a [Declaration],
    uses_python: bool,
    head: Vec<Fragment>,
    body: Vec<Fragment>,
}

impl<'a> Document<'a> {
    pub fn new(options: &'a CompileOptions, title: &'a str) -> Self {
        Document {
            options,
            title,
            mobile: false,
            declarations: &[],
            uses_python: false,
            head: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Constrain the body to a phone-sized viewport.
    pub fn mobile(mut self, mobile: bool) -> Self {
        self.mobile = mobile;
        self
    }

    pub fn declarations(mut self, declarations: &'a [Declaration]) -> Self {
        self.declarations = declarations;
        self
    }

    /// Reference and start the in-browser Python runtime.
    pub fn python_runtime(mut self, enabled: bool) -> Self {
        self.uses_python = enabled;
        self
    }

    pub fn push(&mut self, fragment: Fragment) {
        match fragment.placement {
            Placement::Head => self.head.push(fragment),
            Placement::Body => self.body.push(fragment),
        }
    }

    pub fn render(&self) -> String {
        let mut head = format!("<meta charset=\"UTF-8\">\n<title>{}</title>\n", self.title);

        if self.mobile {
            head.push_str(&format!("<style>{}</style>\n", self.options.mobile_style));
        }

        if !self.declarations.is_empty() {
            head.push_str("<script>\n");
            for Declaration { name, expr } in self.declarations {
                head.push_str(&format!("window.{name} = {expr};\n"));
            }
            head.push_str("</script>\n");
        }

        if self.uses_python {
            for src in &self.options.python_runtime {
                head.push_str(&format!("<script src=\"{src}\"></script>\n"));
            }
        }

        head.extend(self.head.iter().map(|f| f.html.as_str()));
        let body: String = self.body.iter().map(|f| f.html.as_str()).collect();

        let body_open = if self.uses_python {
            format!("<body onload=\"{}\">", self.options.python_bootstrap)
        } else {
            "<body>".to_string()
        };

        format!("<!DOCTYPE html><html><head>{head}</head>{body_open}{body}</body></html>")
    }
}
