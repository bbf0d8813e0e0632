//! Element tree for Swift source structure.
//!
//! Every node records its half-open byte [`Span`] in the original source and the exact source text of that
//! span. Children are owned by their parent, ordered by ascending offset, and never overlap.
//!
//! Traversal goes through [`ElementRef`] (a borrowed view over any node kind) and the [`Visitor`] trait at
//! the bottom of this module.

use std::fmt;

use mockgen_core::lang::ownership::Ownership;

/// Source location span (byte offsets, half-open)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return `true` if `other` lies entirely inside `self`.
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Slice `source` by this span, if the span is in bounds and on char boundaries.
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start..self.end)
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

// ============================================================================
// File and declarations
// ============================================================================

/// Root of the tree: one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub span: Span,
    pub text: String,
    pub declarations: Vec<Declaration>,
}

/// Declarations that may appear at file scope or inside a type body.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Type(TypeDeclaration),
    Function(FunctionDeclaration),
    Variable(VariableDeclaration),
    Subscript(SubscriptDeclaration),
}

impl Declaration {
    pub fn span(&self) -> Span {
        match self {
            Declaration::Type(d) => d.span,
            Declaration::Function(d) => d.span,
            Declaration::Variable(d) => d.span,
            Declaration::Subscript(d) => d.span,
        }
    }

    pub fn as_element(&self) -> ElementRef<'_> {
        match self {
            Declaration::Type(d) => ElementRef::TypeDeclaration(d),
            Declaration::Function(d) => ElementRef::FunctionDeclaration(d),
            Declaration::Variable(d) => ElementRef::VariableDeclaration(d),
            Declaration::Subscript(d) => ElementRef::SubscriptDeclaration(d),
        }
    }
}

/// The construct a type declaration was introduced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDeclarationKind {
    Class,
    Struct,
    Enum,
    Protocol,
    Extension,
    Actor,
}

impl TypeDeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeDeclarationKind::Class => "class",
            TypeDeclarationKind::Struct => "struct",
            TypeDeclarationKind::Enum => "enum",
            TypeDeclarationKind::Protocol => "protocol",
            TypeDeclarationKind::Extension => "extension",
            TypeDeclarationKind::Actor => "actor",
        }
    }
}

impl fmt::Display for TypeDeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `class`/`struct`/`enum`/`protocol`/`extension`/`actor` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub kind: TypeDeclarationKind,
    /// Declared name; for extensions, the extended type as written.
    pub name: String,
    pub span: Span,
    pub text: String,
    pub inherited_types: Vec<TypeIdentifier>,
    pub members: Vec<Declaration>,
}

impl TypeDeclaration {
    /// Nested type declarations, in source order.
    pub fn type_declarations(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.members.iter().filter_map(|m| match m {
            Declaration::Type(d) => Some(d),
            _ => None,
        })
    }

    pub fn function_declarations(&self) -> impl Iterator<Item = &FunctionDeclaration> {
        self.members.iter().filter_map(|m| match m {
            Declaration::Function(d) => Some(d),
            _ => None,
        })
    }

    pub fn variable_declarations(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.members.iter().filter_map(|m| match m {
            Declaration::Variable(d) => Some(d),
            _ => None,
        })
    }

    pub fn subscript_declarations(&self) -> impl Iterator<Item = &SubscriptDeclaration> {
        self.members.iter().filter_map(|m| match m {
            Declaration::Subscript(d) => Some(d),
            _ => None,
        })
    }
}

impl File {
    /// Top-level type declarations, in source order.
    pub fn type_declarations(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.declarations.iter().filter_map(|m| match m {
            Declaration::Type(d) => Some(d),
            _ => None,
        })
    }

    pub fn function_declarations(&self) -> impl Iterator<Item = &FunctionDeclaration> {
        self.declarations.iter().filter_map(|m| match m {
            Declaration::Function(d) => Some(d),
            _ => None,
        })
    }

    pub fn variable_declarations(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.declarations.iter().filter_map(|m| match m {
            Declaration::Variable(d) => Some(d),
            _ => None,
        })
    }

    pub fn subscript_declarations(&self) -> impl Iterator<Item = &SubscriptDeclaration> {
        self.declarations.iter().filter_map(|m| match m {
            Declaration::Subscript(d) => Some(d),
            _ => None,
        })
    }

    /// Walk the whole tree with `visitor`, starting at this file.
    pub fn accept<'ast, V: Visitor<'ast> + ?Sized>(&'ast self, visitor: &mut V) {
        walk(visitor, ElementRef::File(self));
    }
}

/// Function, method, initializer or operator declaration.
///
/// The span runs from the first modifier/attribute (or the name, when parsed in isolation) to the last
/// token of the signature; builders widen it to cover the body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// `f`, `==`, `init`, `init?` or `init!`.
    pub name: String,
    pub span: Span,
    pub text: String,
    pub parameters: Vec<MethodParameter>,
    pub return_type: Option<TypeIdentifier>,
    pub throws: bool,
    pub is_static: bool,
}

/// One entry of a parameter clause.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodParameter {
    /// Argument label as written; `_` is kept verbatim.
    pub external_name: Option<String>,
    pub local_name: String,
    pub ty: TypeIdentifier,
    pub variadic: bool,
    /// Default value expression text, without the `=`.
    pub default_value: Option<String>,
    pub span: Span,
    pub text: String,
}

impl MethodParameter {
    /// The label a call site uses for this argument, or `None` for `_`.
    pub fn argument_label(&self) -> Option<&str> {
        match self.external_name.as_deref() {
            Some("_") => None,
            Some(label) => Some(label),
            None => Some(self.local_name.as_str()),
        }
    }
}

/// `var`/`let` property or global.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: String,
    pub span: Span,
    pub text: String,
    /// Declared type name; empty when neither the source nor the index states it.
    pub type_name: String,
    pub type_annotation: Option<TypeIdentifier>,
    pub accessors: Option<GetterSetterKeywordBlock>,
    pub is_writable: bool,
    pub ownership: Option<Ownership>,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptDeclaration {
    pub span: Span,
    pub text: String,
    pub parameters: Vec<MethodParameter>,
    pub return_type: Option<TypeIdentifier>,
    pub accessors: Option<GetterSetterKeywordBlock>,
    pub is_writable: bool,
}

/// `{ get set }`-style accessor keyword block.
#[derive(Debug, Clone, PartialEq)]
pub struct GetterSetterKeywordBlock {
    pub span: Span,
    pub text: String,
    /// `true` iff a `set` accessor is present.
    pub is_writable: bool,
}

// ============================================================================
// Types and expressions
// ============================================================================

/// Shape of a type identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `A`, `A.B`, `Generic<T>`, `Any`, `Self`.
    Named,
    /// `[T]` (or `[]`).
    Array,
    /// `[K:V]`.
    Dictionary,
    /// `T?`.
    Optional,
    /// `T!`.
    ImplicitlyUnwrapped,
    /// `A & B`.
    Composition,
    /// `(A, b: B)`.
    Tuple,
    /// `(A) throws -> B`.
    Function,
    /// `some P` / `any P`.
    Prefixed,
}

/// A parsed type expression.
///
/// `name` is the canonical re-serialisation (`Generic< >` becomes `Generic<>`, dictionary sugar has no
/// spaces, generic arguments are joined with `", "`); `text` is the exact consumed source.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeIdentifier {
    pub name: String,
    pub kind: TypeKind,
    pub span: Span,
    pub text: String,
    /// Generic arguments, element, key/value, wrapped type, composed parts, tuple elements or result.
    pub children: Vec<TypeIdentifier>,
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What follows `self` in a self-expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelfExpressionKind {
    /// `self`
    Bare,
    /// `self.member`
    Method,
    /// `self.init`
    Initializer,
    /// `self[...]`
    Subscript,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelfExpression {
    pub kind: SelfExpressionKind,
    pub span: Span,
    pub text: String,
}

// ============================================================================
// Borrowed element view
// ============================================================================

/// Borrowed view over any node kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementRef<'a> {
    File(&'a File),
    TypeDeclaration(&'a TypeDeclaration),
    FunctionDeclaration(&'a FunctionDeclaration),
    MethodParameter(&'a MethodParameter),
    VariableDeclaration(&'a VariableDeclaration),
    SubscriptDeclaration(&'a SubscriptDeclaration),
    GetterSetterKeywordBlock(&'a GetterSetterKeywordBlock),
    TypeIdentifier(&'a TypeIdentifier),
    SelfExpression(&'a SelfExpression),
}

impl<'a> ElementRef<'a> {
    pub fn span(&self) -> Span {
        match self {
            ElementRef::File(n) => n.span,
            ElementRef::TypeDeclaration(n) => n.span,
            ElementRef::FunctionDeclaration(n) => n.span,
            ElementRef::MethodParameter(n) => n.span,
            ElementRef::VariableDeclaration(n) => n.span,
            ElementRef::SubscriptDeclaration(n) => n.span,
            ElementRef::GetterSetterKeywordBlock(n) => n.span,
            ElementRef::TypeIdentifier(n) => n.span,
            ElementRef::SelfExpression(n) => n.span,
        }
    }

    /// Exact source text of the node's span.
    pub fn text(&self) -> &'a str {
        match self {
            ElementRef::File(n) => &n.text,
            ElementRef::TypeDeclaration(n) => &n.text,
            ElementRef::FunctionDeclaration(n) => &n.text,
            ElementRef::MethodParameter(n) => &n.text,
            ElementRef::VariableDeclaration(n) => &n.text,
            ElementRef::SubscriptDeclaration(n) => &n.text,
            ElementRef::GetterSetterKeywordBlock(n) => &n.text,
            ElementRef::TypeIdentifier(n) => &n.text,
            ElementRef::SelfExpression(n) => &n.text,
        }
    }

    pub fn offset(&self) -> usize {
        self.span().start
    }

    pub fn length(&self) -> usize {
        self.span().len()
    }

    /// Declared name, for node kinds that have one.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            ElementRef::TypeDeclaration(n) => Some(n.name.as_str()),
            ElementRef::FunctionDeclaration(n) => Some(n.name.as_str()),
            ElementRef::MethodParameter(n) => Some(n.local_name.as_str()),
            ElementRef::VariableDeclaration(n) => Some(n.name.as_str()),
            ElementRef::TypeIdentifier(n) => Some(n.name.as_str()),
            _ => None,
        }
    }

    /// Short lowercase kind label, used by outlines and debug output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ElementRef::File(_) => "file",
            ElementRef::TypeDeclaration(n) => n.kind.as_str(),
            ElementRef::FunctionDeclaration(_) => "func",
            ElementRef::MethodParameter(_) => "param",
            ElementRef::VariableDeclaration(_) => "var",
            ElementRef::SubscriptDeclaration(_) => "subscript",
            ElementRef::GetterSetterKeywordBlock(_) => "accessors",
            ElementRef::TypeIdentifier(_) => "type",
            ElementRef::SelfExpression(_) => "self",
        }
    }

    /// Direct children in document order.
    pub fn children(&self) -> Vec<ElementRef<'a>> {
        match *self {
            ElementRef::File(n) => n.declarations.iter().map(Declaration::as_element).collect(),
            ElementRef::TypeDeclaration(n) => n
                .inherited_types
                .iter()
                .map(ElementRef::TypeIdentifier)
                .chain(n.members.iter().map(Declaration::as_element))
                .collect(),
            ElementRef::FunctionDeclaration(n) => n
                .parameters
                .iter()
                .map(ElementRef::MethodParameter)
                .chain(n.return_type.iter().map(ElementRef::TypeIdentifier))
                .collect(),
            ElementRef::MethodParameter(n) => vec![ElementRef::TypeIdentifier(&n.ty)],
            ElementRef::VariableDeclaration(n) => n
                .type_annotation
                .iter()
                .map(ElementRef::TypeIdentifier)
                .chain(n.accessors.iter().map(ElementRef::GetterSetterKeywordBlock))
                .collect(),
            ElementRef::SubscriptDeclaration(n) => n
                .parameters
                .iter()
                .map(ElementRef::MethodParameter)
                .chain(n.return_type.iter().map(ElementRef::TypeIdentifier))
                .chain(n.accessors.iter().map(ElementRef::GetterSetterKeywordBlock))
                .collect(),
            ElementRef::TypeIdentifier(n) => n.children.iter().map(ElementRef::TypeIdentifier).collect(),
            ElementRef::GetterSetterKeywordBlock(_) | ElementRef::SelfExpression(_) => Vec::new(),
        }
    }
}

// ============================================================================
// Visitor trait for tree traversal
// ============================================================================

/// Read-only tree visitor.
///
/// [`walk`] calls [`Visitor::visit_element`] for every node in pre-order document order, and additionally the
/// kind-specific method for that node. A visitor cannot skip subtrees or stop early.
pub trait Visitor<'ast> {
    fn visit_element(&mut self, _element: ElementRef<'ast>) {}
    fn visit_file(&mut self, _file: &'ast File) {}
    fn visit_type_declaration(&mut self, _decl: &'ast TypeDeclaration) {}
    fn visit_function_declaration(&mut self, _decl: &'ast FunctionDeclaration) {}
    fn visit_method_parameter(&mut self, _param: &'ast MethodParameter) {}
    fn visit_variable_declaration(&mut self, _decl: &'ast VariableDeclaration) {}
    fn visit_subscript_declaration(&mut self, _decl: &'ast SubscriptDeclaration) {}
    fn visit_getter_setter_block(&mut self, _block: &'ast GetterSetterKeywordBlock) {}
    fn visit_type_identifier(&mut self, _ty: &'ast TypeIdentifier) {}
    fn visit_self_expression(&mut self, _expr: &'ast SelfExpression) {}
}

/// Depth-first pre-order traversal of `element` and all its descendants.
pub fn walk<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, element: ElementRef<'ast>) {
    visitor.visit_element(element);
    match element {
        ElementRef::File(n) => visitor.visit_file(n),
        ElementRef::TypeDeclaration(n) => visitor.visit_type_declaration(n),
        ElementRef::FunctionDeclaration(n) => visitor.visit_function_declaration(n),
        ElementRef::MethodParameter(n) => visitor.visit_method_parameter(n),
        ElementRef::VariableDeclaration(n) => visitor.visit_variable_declaration(n),
        ElementRef::SubscriptDeclaration(n) => visitor.visit_subscript_declaration(n),
        ElementRef::GetterSetterKeywordBlock(n) => visitor.visit_getter_setter_block(n),
        ElementRef::TypeIdentifier(n) => visitor.visit_type_identifier(n),
        ElementRef::SelfExpression(n) => visitor.visit_self_expression(n),
    }
    for child in element.children() {
        walk(visitor, child);
    }
}
