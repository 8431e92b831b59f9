/*
 * Type Descriptors
 *
 * Expected shape of a field's value. Built once from static configuration
 * and matched structurally; no runtime type introspection.
 *
 * Shorthand syntax (YAML and FromStr):
 *   Subject
 *   List[Calibration]
 *   Optional[List[Software]]
 *   Union[Surgery, TrainingProtocol]
 *
 * `Set[...]` and `Sequence[...]` are accepted as synonyms of `List[...]`.
 *
 * Tagged YAML form is also accepted:
 *   { list_of: { model: Calibration } }
 */

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Deepest constructor nesting the shorthand parser accepts
pub const MAX_DESCRIPTOR_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "DescriptorRepr")]
pub enum TypeDescriptor {
    /// Validate as an object against a named model
    Model(String),
    /// Every element satisfies the inner descriptor
    ListOf(Box<TypeDescriptor>),
    /// Never structurally rejected at field level
    OptionalOf(Box<TypeDescriptor>),
    /// Any variant validates; first match wins
    UnionOf(Vec<TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn model(name: impl Into<String>) -> Self {
        TypeDescriptor::Model(name.into())
    }

    pub fn list_of(inner: TypeDescriptor) -> Self {
        TypeDescriptor::ListOf(Box::new(inner))
    }

    pub fn optional_of(inner: TypeDescriptor) -> Self {
        TypeDescriptor::OptionalOf(Box::new(inner))
    }

    pub fn union_of(variants: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::UnionOf(variants)
    }

    /// Whether the shorthand written by `Display` parses back to `self`:
    /// model names use the identifier charset, unions are non-empty and
    /// nesting stays within `MAX_DESCRIPTOR_DEPTH`.
    pub fn check_shorthand(&self) -> Result<(), DescriptorParseError> {
        check_shorthand_at(self, self, 0)
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeDescriptor::OptionalOf(_))
    }

    /// Every model name referenced anywhere in this descriptor
    pub fn model_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_models(&mut names);
        names
    }

    fn collect_models<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeDescriptor::Model(name) => out.push(name),
            TypeDescriptor::ListOf(inner) | TypeDescriptor::OptionalOf(inner) => {
                inner.collect_models(out)
            }
            TypeDescriptor::UnionOf(variants) => {
                for variant in variants {
                    variant.collect_models(out);
                }
            }
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Model(name) => f.write_str(name),
            TypeDescriptor::ListOf(inner) => write!(f, "List[{}]", inner),
            TypeDescriptor::OptionalOf(inner) => write!(f, "Optional[{}]", inner),
            TypeDescriptor::UnionOf(variants) => {
                f.write_str("Union[")?;
                for (i, variant) in variants.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", variant)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Shorthand parse failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid type descriptor '{input}' at position {position}: {message}")]
pub struct DescriptorParseError {
    pub input: String,
    pub position: usize,
    pub message: String,
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            input: s,
            bytes: s.as_bytes(),
            pos: 0,
        };
        let descriptor = parser.descriptor(0)?;
        parser.skip_ws();
        if parser.pos != parser.bytes.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(descriptor)
    }
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: &str) -> DescriptorParseError {
        DescriptorParseError {
            input: self.input.to_string(),
            position: self.pos,
            message: message.to_string(),
        }
    }

    fn skip_ws(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        self.skip_ws();
        if self.bytes.get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Result<&'a str, DescriptorParseError> {
        self.skip_ws();
        let start = self.pos;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if is_ident_byte(b) {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error("expected a model name"));
        }
        Ok(&self.input[start..self.pos])
    }

    fn descriptor(&mut self, depth: usize) -> Result<TypeDescriptor, DescriptorParseError> {
        let name = self.ident()?;
        if !self.eat(b'[') {
            return Ok(TypeDescriptor::model(name));
        }
        if depth >= MAX_DESCRIPTOR_DEPTH {
            return Err(self.error("descriptor nested too deeply"));
        }

        let mut args = vec![self.descriptor(depth + 1)?];
        while self.eat(b',') {
            args.push(self.descriptor(depth + 1)?);
        }
        if !self.eat(b']') {
            return Err(self.error("expected ']'"));
        }

        match name {
            "List" | "Set" | "Sequence" | "Optional" if args.len() != 1 => {
                Err(self.error(&format!("{} takes exactly one argument", name)))
            }
            "List" | "Set" | "Sequence" => Ok(TypeDescriptor::list_of(args.remove(0))),
            "Optional" => Ok(TypeDescriptor::optional_of(args.remove(0))),
            "Union" => Ok(TypeDescriptor::union_of(args)),
            other => Err(self.error(&format!("unknown type constructor '{}'", other))),
        }
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.')
}

fn check_shorthand_at(
    root: &TypeDescriptor,
    descriptor: &TypeDescriptor,
    depth: usize,
) -> Result<(), DescriptorParseError> {
    let invalid = |message: String| DescriptorParseError {
        input: root.to_string(),
        position: 0,
        message,
    };
    match descriptor {
        TypeDescriptor::Model(name) => {
            if name.is_empty() || !name.bytes().all(is_ident_byte) {
                return Err(invalid(format!("'{}' is not a valid model name", name)));
            }
            Ok(())
        }
        _ if depth >= MAX_DESCRIPTOR_DEPTH => Err(invalid("descriptor nested too deeply".to_string())),
        TypeDescriptor::ListOf(inner) | TypeDescriptor::OptionalOf(inner) => {
            check_shorthand_at(root, inner, depth + 1)
        }
        TypeDescriptor::UnionOf(variants) => {
            if variants.is_empty() {
                return Err(invalid("union needs at least one variant".to_string()));
            }
            variants
                .iter()
                .try_for_each(|variant| check_shorthand_at(root, variant, depth + 1))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptorRepr {
    Shorthand(String),
    Tagged(TaggedDescriptor),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
enum TaggedDescriptor {
    Model(String),
    ListOf(Box<TypeDescriptor>),
    OptionalOf(Box<TypeDescriptor>),
    UnionOf(Vec<TypeDescriptor>),
}

impl TryFrom<DescriptorRepr> for TypeDescriptor {
    type Error = DescriptorParseError;

    fn try_from(repr: DescriptorRepr) -> Result<Self, Self::Error> {
        let descriptor = match repr {
            DescriptorRepr::Shorthand(s) => return s.parse(),
            DescriptorRepr::Tagged(TaggedDescriptor::Model(name)) => TypeDescriptor::Model(name),
            DescriptorRepr::Tagged(TaggedDescriptor::ListOf(inner)) => TypeDescriptor::ListOf(inner),
            DescriptorRepr::Tagged(TaggedDescriptor::OptionalOf(inner)) => {
                TypeDescriptor::OptionalOf(inner)
            }
            DescriptorRepr::Tagged(TaggedDescriptor::UnionOf(variants)) => {
                TypeDescriptor::UnionOf(variants)
            }
        };
        descriptor.check_shorthand()?;
        Ok(descriptor)
    }
}
