//! Output dialects and the token table each one spells its output with.
//!
//! The emitter never branches on the dialect itself: every fixed piece of text
//! it writes comes from the [`Syntax`] table returned by [`Dialect::syntax`].

use serde::Serialize;
use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

use crate::error::Error;

/// The surface syntax generated code is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Dialect {
    /// C# (`.cs` and anything that is not `.vb`).
    #[default]
    CSharp,
    /// Visual Basic (`.vb`).
    VisualBasic,
}

impl Dialect {
    /// Picks the dialect from the output file's extension.
    ///
    /// `.vb` in any letter case selects [`Dialect::VisualBasic`]; every other
    /// extension, or none at all, selects [`Dialect::CSharp`].
    ///
    /// # Example
    /// ```rust
    /// use resxgen::Dialect;
    /// assert_eq!(Dialect::from_output_path("SR.vb"), Dialect::VisualBasic);
    /// assert_eq!(Dialect::from_output_path("SR.VB"), Dialect::VisualBasic);
    /// assert_eq!(Dialect::from_output_path("SR.cs"), Dialect::CSharp);
    /// assert_eq!(Dialect::from_output_path("SR"), Dialect::CSharp);
    /// ```
    pub fn from_output_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("vb") => Dialect::VisualBasic,
            _ => Dialect::CSharp,
        }
    }

    /// Returns the typical file extension for this dialect.
    pub fn extension(&self) -> &'static str {
        match self {
            Dialect::CSharp => "cs",
            Dialect::VisualBasic => "vb",
        }
    }

    /// Returns the token table for this dialect.
    pub fn syntax(&self) -> &'static Syntax {
        match self {
            Dialect::CSharp => &CSHARP,
            Dialect::VisualBasic => &VISUAL_BASIC,
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::CSharp => write!(f, "csharp"),
            Dialect::VisualBasic => write!(f, "vb"),
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "cs" | "csharp" | "c#" => Ok(Dialect::CSharp),
            "vb" | "visualbasic" | "vbnet" => Ok(Dialect::VisualBasic),
            other => Err(Error::UnknownDialect(other.to_string())),
        }
    }
}

/// Fixed spellings of every token the emitter writes.
///
/// Line-valued fields are whole lines without the trailing line break,
/// indentation included. `None` means the dialect has no such line.
#[derive(Debug, PartialEq, Eq)]
pub struct Syntax {
    pub comment_prefix: &'static str,
    pub namespace_keyword: &'static str,
    pub namespace_open: Option<&'static str>,
    pub namespace_close: &'static str,
    pub accessor_type_declaration: &'static str,
    pub marker_type_declaration: &'static str,
    pub type_body_open: &'static str,
    pub type_body_close: &'static str,
    pub suppress_unused_warning: Option<&'static str>,
    pub restore_unused_warning: Option<&'static str>,
    pub if_not_directive: &'static str,
    pub else_directive: &'static str,
    pub end_if_directive: &'static str,
    pub string_type: &'static str,
    pub type_type: &'static str,
    pub string_literal_prefix: &'static str,
    pub null_literal: &'static str,
    pub type_of_operator: &'static str,
    layout: PropertyLayout,
}

/// Which of the two member shapes a property is written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberForm {
    /// Carries the resource value inline.
    Debug,
    /// Resolved at run time; also used for `ResourceType`.
    Release,
}

#[derive(Debug, PartialEq, Eq)]
enum PropertyLayout {
    Braced,
    Keyword,
}

static CSHARP: Syntax = Syntax {
    comment_prefix: "// ",
    namespace_keyword: "namespace",
    namespace_open: Some("{"),
    namespace_close: "}",
    accessor_type_declaration: "    internal static partial class SR",
    marker_type_declaration: "    internal static class SR",
    type_body_open: "    {",
    type_body_close: "    }",
    suppress_unused_warning: Some("#pragma warning disable 0414"),
    restore_unused_warning: Some("#pragma warning restore 0414"),
    if_not_directive: "#if !DEBUGRESOURCES",
    else_directive: "#else",
    end_if_directive: "#endif",
    string_type: "string",
    type_type: "Type",
    string_literal_prefix: "@\"",
    null_literal: "null",
    type_of_operator: "typeof",
    layout: PropertyLayout::Braced,
};

static VISUAL_BASIC: Syntax = Syntax {
    comment_prefix: "' ",
    namespace_keyword: "Namespace",
    namespace_open: None,
    namespace_close: "End Namespace",
    accessor_type_declaration: "    Friend Partial Class SR",
    marker_type_declaration: "    Friend Class SR",
    type_body_open: "    ",
    type_body_close: "    End Class",
    suppress_unused_warning: None,
    restore_unused_warning: None,
    if_not_directive: "#If Not DEBUGRESOURCES Then",
    else_directive: "#Else",
    end_if_directive: "#End If",
    string_type: "String",
    type_type: "Type",
    string_literal_prefix: "\"",
    null_literal: "Nothing",
    type_of_operator: "GetType",
    layout: PropertyLayout::Keyword,
};

impl Syntax {
    /// A string literal holding `escaped`, whose quotes are already doubled.
    pub fn string_literal(&self, escaped: &str) -> String {
        format!("{}{}\"", self.string_literal_prefix, escaped)
    }

    /// The type-of expression for a fully-qualified type name.
    pub fn type_of(&self, type_name: &str) -> String {
        format!("{}({})", self.type_of_operator, type_name)
    }

    /// Declaration of the private constant holding the resources name.
    pub fn resources_name_constant(&self, resources_name: &str) -> String {
        match self.layout {
            PropertyLayout::Braced => format!(
                "        private const string s_resourcesName = \"{}\";",
                resources_name
            ),
            PropertyLayout::Keyword => format!(
                "        Private Const s_resourcesName As String = \"{}\"",
                resources_name
            ),
        }
    }

    /// A static read-only property of type `ty` returning `expr`.
    ///
    /// The returned text spans several lines and ends with a line break. VB
    /// indents the `Get`/`Return` lines of the release form one column
    /// differently from the debug form.
    pub fn read_only_property(&self, name: &str, ty: &str, expr: &str, form: MemberForm) -> String {
        match (&self.layout, form) {
            (PropertyLayout::Braced, _) => format!(
                "        internal static {ty} {name} {{\n              get {{ return {expr}; }}\n        }}\n"
            ),
            (PropertyLayout::Keyword, MemberForm::Debug) => format!(
                "        Friend Shared ReadOnly Property {name} As {ty}\n            Get\n                Return {expr}\n            End Get\n        End Property\n"
            ),
            (PropertyLayout::Keyword, MemberForm::Release) => format!(
                "        Friend Shared ReadOnly Property {name} As {ty}\n           Get\n                 Return {expr}\n            End Get\n        End Property\n"
            ),
        }
    }
}
