//! Outline AST for sample sources.
//!
//! Only declarations are represented. Function bodies are kept as text with their common
//! indentation removed, which is the form extracted samples are published in.

use sampledoc_core::LanguageId;
use sampledoc_core::Visibility;
use sampledoc_core::conventions::TEST_ANNOTATION;

/// Byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Declarations found in one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutline {
    pub language: LanguageId,
    pub package: Option<Spanned<String>>,
    /// Top-level class-like declarations, in source order.
    pub classes: Vec<ClassDecl>,
    /// Top-level functions (Kotlin only).
    pub functions: Vec<FunctionDecl>,
}

impl SourceOutline {
    pub fn package_name(&self) -> Option<&str> {
        self.package.as_ref().map(|p| p.node.as_str())
    }

    /// Top-level classes whose visibility is public.
    pub fn public_classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.classes.iter().filter(|c| c.visibility == Visibility::Public)
    }

    /// Find a top-level class by simple name.
    pub fn find_class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Number of class-like declarations at any depth, companion objects excluded.
    pub fn class_count(&self) -> usize {
        self.classes.iter().map(ClassDecl::declaration_count).sum()
    }
}

/// Which keyword introduced a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Record,
    Object,
    CompanionObject,
}

impl ClassKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(ClassKind::Class),
            "interface" => Some(ClassKind::Interface),
            "enum" => Some(ClassKind::Enum),
            "record" => Some(ClassKind::Record),
            "object" => Some(ClassKind::Object),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub kind: ClassKind,
    pub visibility: Visibility,
    pub modifiers: Vec<String>,
    pub annotations: Vec<String>,
    /// Span of the declaring keyword through the class name.
    pub span: Span,
    pub functions: Vec<FunctionDecl>,
    pub nested: Vec<ClassDecl>,
}

impl ClassDecl {
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    /// Java `static` nested class (Kotlin nested classes are static unless `inner`).
    pub fn is_static(&self) -> bool {
        self.has_modifier("static")
    }

    /// Functions annotated with `@Test`, in declaration order.
    pub fn test_functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.functions.iter().filter(|f| f.is_test())
    }

    pub fn find_nested(&self, name: &str) -> Option<&ClassDecl> {
        self.nested.iter().find(|c| c.name == name)
    }

    fn declaration_count(&self) -> usize {
        let own = usize::from(self.kind != ClassKind::CompanionObject);
        own + self.nested.iter().map(ClassDecl::declaration_count).sum::<usize>()
    }
}

/// Body of a function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionBody {
    /// Statements between braces, common indentation removed.
    Block(String),
    /// Kotlin single-expression body (`fun f() = expr`), without the `=`.
    Expression(String),
    /// Abstract or interface declaration.
    Absent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub visibility: Visibility,
    pub modifiers: Vec<String>,
    pub annotations: Vec<String>,
    pub body: FunctionBody,
    /// Span of the function name.
    pub span: Span,
    pub is_constructor: bool,
}

impl FunctionDecl {
    /// Whether the function carries a `@Test` annotation (qualified or not).
    pub fn is_test(&self) -> bool {
        self.annotations
            .iter()
            .any(|a| a == TEST_ANNOTATION || a.rsplit('.').next() == Some(TEST_ANNOTATION))
    }

    pub fn is_single_expression(&self) -> bool {
        matches!(self.body, FunctionBody::Expression(_))
    }

    /// Body text, if the function has one.
    pub fn body_text(&self) -> Option<&str> {
        match &self.body {
            FunctionBody::Block(text) | FunctionBody::Expression(text) => Some(text),
            FunctionBody::Absent => None,
        }
    }
}
