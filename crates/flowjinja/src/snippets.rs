//! Editor suggestion data for template authoring.
//!
//! A static table of template syntax constructs, used purely for authoring
//! assistance in host editors (autocomplete, hover). No runtime behavior
//! depends on this data. Insert texts use the editor snippet placeholder
//! convention (`${1:name}`, `$2`) and cover the Jinja dialect the engine
//! actually ships.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// One editor suggestion: a completion label, a human-readable explanation,
/// and the snippet text to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    /// Completion label shown in the editor.
    pub label: &'static str,
    /// Explanation of the construct.
    pub detail: &'static str,
    /// Snippet body, with editor placeholder syntax.
    pub insert_text: &'static str,
}

/// All template syntax suggestions, in display order.
pub static SNIPPETS: &[Snippet] = &[
    Snippet {
        label: "var",
        detail: "A variable looks up a value from the template context. \
                 To display a variable: {{ username }}",
        insert_text: "{{ ${1:var} }}",
    },
    Snippet {
        label: "tag",
        detail: "A template statement block.",
        insert_text: "{% $1 %}",
    },
    Snippet {
        label: "block",
        detail: "block defines a named section of the template for use with template \
                 inheritance. Base templates declare blocks and child templates \
                 override them with new content.",
        insert_text: "{% block ${1:name} %}\n\t$2\n{% endblock %}",
    },
    Snippet {
        label: "extends",
        detail: "extends declares template inheritance. The named template is used \
                 as the base template.",
        insert_text: "{% extends \"${1:template}\" %}$2",
    },
    Snippet {
        label: "include",
        detail: "include pulls another template in place. Useful for sharing smaller \
                 chunks across templates that already inherit from a base.",
        insert_text: "{% include \"${1:template}\" %}$2",
    },
    Snippet {
        label: "import",
        detail: "import loads another template and exposes its exported values. \
                 Macros and top-level set assignments are exported, so they can be \
                 used from the importing template.",
        insert_text: "{% import \"${1:template}\" as ${2:var} %}$3",
    },
    Snippet {
        label: "from",
        detail: "Imports specific values from a template into the current namespace.",
        insert_text: "{% from \"${1:template}\" import ${2:macro} as ${3:var} %}$4",
    },
    Snippet {
        label: "for",
        detail: "for iterates over sequences and mappings.",
        insert_text: "{% for ${1:item} in ${2:sequence} %}\n\t$3\n{% endfor %}",
    },
    Snippet {
        label: "if",
        detail: "if tests a condition and selectively displays content.",
        insert_text: "{% if ${1:condition} %}\n\t$2\n{% endif %}",
    },
    Snippet {
        label: "ife",
        detail: "An if block with an else branch.",
        insert_text: "{% if ${1:condition} %}\n\t$2\n{% else %}\n\t$3\n{% endif %}",
    },
    Snippet {
        label: "ifel",
        detail: "An if block with elif and else branches.",
        insert_text:
            "{% if ${1:condition} %}\n\t$2\n{% elif ${3:condition} %}\n\t$4\n{% else %}\n\t$5\n{% endif %}",
    },
    Snippet {
        label: "elif",
        detail: "Alternate condition in an if block.",
        insert_text: "{% elif ${1:condition} %}\n\t$2",
    },
    Snippet {
        label: "else",
        detail: "Fallback branch in an if block or for loop.",
        insert_text: "{% else %}\n\t$1",
    },
    Snippet {
        label: "set",
        detail: "set creates or modifies a variable.",
        insert_text: "{% set ${1:var} = ${2:value} %}$3",
    },
    Snippet {
        label: "macro",
        detail: "macro defines a reusable chunk of content, similar to a function.",
        insert_text: "{% macro ${1:name}(${2:args}) %}\n\t$3\n{% endmacro %}",
    },
    Snippet {
        label: "call",
        detail: "A call block invokes a macro with the block's body as content, \
                 available inside the macro as caller().",
        insert_text: "{% call ${1:macro}() %}\n\t$2\n{% endcall %}",
    },
    Snippet {
        label: "filter",
        detail: "A filter block applies a filter to the rendered contents of the \
                 block instead of a piped value.",
        insert_text: "{% filter ${1:filter} %}\n\t$2\n{% endfilter %}",
    },
    Snippet {
        label: "raw",
        detail: "Anything inside a raw block is output as plain text, including \
                 special delimiters like {{.",
        insert_text: "{% raw %}\n\t$1\n{% endraw %}",
    },
    Snippet {
        label: "comment",
        detail: "A comment is dropped from the output entirely.",
        insert_text: "{# $1 #}",
    },
    Snippet {
        label: "super",
        detail: "Renders the contents of the parent block inside a child block.",
        insert_text: "{{ super() }}",
    },
    Snippet {
        label: "pipe",
        detail: "Applies a filter to a value, e.g. {{ name | upper }}.",
        insert_text: "| ${1:filter}",
    },
];

static BY_LABEL: Lazy<HashMap<&'static str, &'static Snippet>> =
    Lazy::new(|| SNIPPETS.iter().map(|s| (s.label, s)).collect());

/// Looks up a suggestion by its completion label.
pub fn find(label: &str) -> Option<&'static Snippet> {
    BY_LABEL.get(label).copied()
}
