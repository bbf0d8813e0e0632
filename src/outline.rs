//! Indented element-tree outline, built with a [`Visitor`].

use std::fmt::Write;

use mockgen_syntax::ast::*;

/// Rendering options for [`render_outline_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Append each element's byte range.
    pub spans: bool,
    /// Skip type identifiers, parameters and accessor blocks.
    pub declarations_only: bool,
}

/// Render `file` as one line per element, two spaces of indent per level.
pub fn render_outline(file: &File) -> String {
    render_outline_with(file, OutlineOptions::default())
}

pub fn render_outline_with(file: &File, options: OutlineOptions) -> String {
    let mut outline = Outline {
        options,
        out: String::new(),
        pending: Vec::new(),
    };
    file.accept(&mut outline);
    outline.out
}

struct Outline {
    options: OutlineOptions,
    out: String,
    /// Children still to be visited, one counter per open ancestor.
    pending: Vec<usize>,
}

impl Outline {
    fn enter(&mut self, element: ElementRef<'_>) -> usize {
        let depth = self.pending.len();
        if let Some(remaining) = self.pending.last_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        let children = element.children().len();
        if children > 0 {
            self.pending.push(children);
        } else {
            while self.pending.last() == Some(&0) {
                self.pending.pop();
            }
        }
        depth
    }

    fn is_detail(element: ElementRef<'_>) -> bool {
        matches!(
            element,
            ElementRef::TypeIdentifier(_) | ElementRef::MethodParameter(_) | ElementRef::GetterSetterKeywordBlock(_)
        )
    }
}

impl<'ast> Visitor<'ast> for Outline {
    fn visit_element(&mut self, element: ElementRef<'ast>) {
        let depth = self.enter(element);
        if self.options.declarations_only && Self::is_detail(element) {
            return;
        }
        let _ = write!(self.out, "{:indent$}{}", "", describe(element), indent = depth * 2);
        if self.options.spans {
            let span = element.span();
            let _ = write!(self.out, " [{}..{}]", span.start, span.end);
        }
        self.out.push('\n');
    }
}

/// One-line description of an element.
pub fn describe(element: ElementRef<'_>) -> String {
    let mut line = element.kind_name().to_string();
    match element {
        ElementRef::File(file) => {
            let _ = write!(line, " ({} declarations)", file.declarations.len());
        }
        ElementRef::TypeDeclaration(decl) => {
            let _ = write!(line, " {}", decl.name);
        }
        ElementRef::FunctionDeclaration(decl) => {
            let _ = write!(line, " {}", decl.name);
            if decl.is_static {
                line.push_str(" static");
            }
            if decl.throws {
                line.push_str(" throws");
            }
        }
        ElementRef::MethodParameter(param) => {
            match param.argument_label() {
                Some(label) if label != param.local_name => {
                    let _ = write!(line, " {} {}", label, param.local_name);
                }
                Some(_) => {
                    let _ = write!(line, " {}", param.local_name);
                }
                None => {
                    let _ = write!(line, " _ {}", param.local_name);
                }
            }
            if param.variadic {
                line.push_str("...");
            }
            if let Some(default) = &param.default_value {
                let _ = write!(line, " = {}", default);
            }
        }
        ElementRef::VariableDeclaration(decl) => {
            let _ = write!(line, " {}", decl.name);
            if !decl.type_name.is_empty() {
                let _ = write!(line, ": {}", decl.type_name);
            }
            if let Some(ownership) = decl.ownership {
                let _ = write!(line, " {}", ownership);
            }
            if decl.is_static {
                line.push_str(" static");
            }
            if !decl.is_writable {
                line.push_str(" readonly");
            }
        }
        ElementRef::SubscriptDeclaration(decl) => {
            if !decl.is_writable {
                line.push_str(" readonly");
            }
        }
        ElementRef::GetterSetterKeywordBlock(block) => {
            line.push_str(if block.is_writable { " get set" } else { " get" });
        }
        ElementRef::TypeIdentifier(ty) => {
            let _ = write!(line, " {}", ty.name);
        }
        ElementRef::SelfExpression(expr) => {
            let _ = write!(line, " {:?}", expr.kind);
        }
    }
    line
}
