//! # Typed Prompt Templates
//!
//! A template is parsed once into literal text and named slots. Unknown slots
//! are rejected when the template is built, and rendering is a single pass over
//! the parsed segments, so values (including the user's question) are never
//! re-read as template syntax.

use crate::errors::PromptError;
use regex::Regex;
use std::fmt;

/// The named slots a prompt template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The schema or retrieval context text.
    Schema,
    /// The per-table column selection block.
    Columns,
    /// The SQL namespace that qualifies table names.
    Namespace,
    /// The user's natural-language question.
    Question,
}

impl Slot {
    pub fn name(self) -> &'static str {
        match self {
            Slot::Schema => "schema",
            Slot::Columns => "columns",
            Slot::Namespace => "namespace",
            Slot::Question => "question",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "schema" => Some(Slot::Schema),
            "columns" => Some(Slot::Columns),
            "namespace" => Some(Slot::Namespace),
            "question" => Some(Slot::Question),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// The values substituted into a template.
#[derive(Debug, Clone, Default)]
pub struct PromptSlots<'a> {
    pub schema: &'a str,
    pub columns: &'a str,
    pub namespace: &'a str,
    pub question: &'a str,
}

impl PromptSlots<'_> {
    fn value(&self, slot: Slot) -> &str {
        match slot {
            Slot::Schema => self.schema,
            Slot::Columns => self.columns,
            Slot::Namespace => self.namespace,
            Slot::Question => self.question,
        }
    }
}

/// A validated prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parses `template`, requiring every slot in `required` to appear at least once.
    pub fn new(template: &str, required: &[Slot]) -> Result<Self, PromptError> {
        let re = Regex::new(r"\{([a-z_]+)\}")?;
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in re.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let slot = Slot::from_name(name.as_str()).ok_or_else(|| {
                PromptError::Template(format!("unknown slot `{}`", whole.as_str()))
            })?;
            if whole.start() > last {
                segments.push(Segment::Literal(template[last..whole.start()].to_string()));
            }
            segments.push(Segment::Slot(slot));
            last = whole.end();
        }
        if last < template.len() {
            segments.push(Segment::Literal(template[last..].to_string()));
        }

        let parsed = Self { segments };
        if let Some(missing) = required.iter().find(|s| !parsed.uses(**s)) {
            return Err(PromptError::Template(format!(
                "required slot `{missing}` is missing"
            )));
        }
        Ok(parsed)
    }

    /// Whether the template references `slot`.
    pub fn uses(&self, slot: Slot) -> bool {
        self.segments.contains(&Segment::Slot(slot))
    }

    /// Substitutes every slot with its value.
    pub fn render(&self, slots: &PromptSlots<'_>) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Slot(slot) => slots.value(*slot),
            })
            .collect()
    }
}
