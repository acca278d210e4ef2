use std::collections::HashSet;

use heck::ToLowerCamelCase;
use toolgen_core::ir::ParamType;

/// Reserved words and literals that cannot be used as Java identifiers.
const JAVA_KEYWORDS: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Map a tool argument type to the Java type used in the method signature.
pub fn java_type(param_type: ParamType) -> &'static str {
    match param_type {
        ParamType::Int => "int",
        ParamType::Double => "double",
        ParamType::Boolean => "boolean",
        ParamType::String => "String",
    }
}

/// Whether a Java argument of this type can be `null`.
pub fn is_nullable(param_type: ParamType) -> bool {
    param_type == ParamType::String
}

pub fn is_java_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

/// ASCII Java identifier check: `[A-Za-z_$][A-Za-z0-9_$]*`, not a keyword.
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !is_java_keyword(name)
}

/// Force arbitrary text into a Java identifier: characters outside
/// `[A-Za-z0-9_]` become `_`, a leading digit gets a `_` prefix and keywords
/// get a `_` suffix.
pub fn sanitize_identifier(raw: &str) -> String {
    let mut ident: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() {
        return "arg".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if is_java_keyword(&ident) {
        ident.push('_');
    }
    ident
}

/// Java identifier for a tool argument. Names that are already valid are
/// kept verbatim; anything else (`X-Request-Id`, `page[size]`) is camel-cased
/// first so the result stays readable.
pub fn parameter_identifier(name: &str) -> String {
    if is_java_identifier(name) {
        name.to_string()
    } else {
        sanitize_identifier(&name.to_lower_camel_case())
    }
}

/// Hands out identifiers that are unique within one scope.
#[derive(Debug, Default)]
pub struct IdentifierPool {
    taken: HashSet<String>,
}

impl IdentifierPool {
    /// A pool where `reserved` are already in use.
    pub fn with_reserved<'a>(reserved: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            taken: reserved.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Claim `base`, or `base2`, `base3`, ... if it is taken.
    pub fn claim(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}{n}");
            n += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}
