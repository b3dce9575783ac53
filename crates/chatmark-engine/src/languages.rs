//! Code fence languages that get syntax highlighting.
//!
//! A fence tagged with anything else renders as a plain code block, tag
//! included in its body.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Registered language tags, longest first.
pub const SUPPORTED_LANGUAGES: [&str; 308] = [
    "html.handlebars", "livecodeserver", "ruleslanguage", "actionscript", "coffeescript",
    "angelscript", "applescript", "lassoscript", "mathematica", "mojolicious", "python-repl",
    "arduinoino", "apacheconf", "autohotkey", "freepascal", "dockerfile", "handlebars",
    "javascript", "livescript", "moonscript", "objectivec", "postgresql", "powershell",
    "processing", "properties", "typescript", "accesslog", "osascript", "brainfuck",
    "capnproto", "nginxconf", "plaintext", "instances", "smalltalk", "stanfuncs", "asciidoc",
    "cmake.in", "dsconfig", "gololang", "html.hbs", "makefile", "markdown", "openscad",
    "postgres", "protobuf", "reasonml", "craftcms", "vbscript", "aspectj", "clojure",
    "crystal", "lazarus", "fortran", "gherkin", "haskell", "inform7", "mercury", "oxygene",
    "pf.conf", "parser3", "profile", "gemspec", "podspec", "console", "subunit", "verilog",
    "armasm", "avrasm", "apache", "arcade", "autoit", "axapta", "csharp", "coffee", "delphi",
    "pascal", "django", "docker", "elixir", "erlang", "fsharp", "golang", "gradle", "groovy",
    "hylang", "irpf90", "kotlin", "mkdown", "matlab", "maxima", "monkey", "nimrod", "prolog",
    "puppet", "python", "scheme", "scilab", "stylus", "thrift", "x86asm", "xquery", "zephir",
    "basic", "cmake", "capnp", "crmsh", "patch", "jinja", "excel", "gcode", "gauss", "xhtml",
    "plist", "https", "lasso", "mizar", "nginx", "ocaml", "obj-c", "pgsql", "pycon", "graph",
    "scala", "shell", "smali", "stata", "swift", "vbnet", "xpath", "abnf", "adoc", "mawk",
    "nawk", "gawk", "bash", "cson", "iced", "pcmk", "zone", "bind", "dart", "diff", "dust",
    "ebnf", "xlsx", "gams", "golo", "html", "atom", "http", "haml", "haxe", "toml", "json",
    "java", "leaf", "less", "ldif", "lisp", "moon", "n1ql", "nsis", "objc", "glsl", "scad",
    "php3", "php4", "php5", "php6", "php7", "perl", "text", "pony", "ruby", "thor", "rust",
    "scss", "step", "stan", "styl", "twig", "vhdl", "vala", "yaml", "ada", "arm", "asc", "awk",
    "zsh", "bnf", "cpp", "hpp", "c++", "h++", "cxx", "hxx", "cal", "cos", "cls", "coq", "csp",
    "css", "clj", "crm", "dns", "dos", "bat", "cmd", "dpr", "dfm", "pas", "lpr", "lfm", "dts",
    "dst", "elm", "erl", "xls", "fix", "f90", "f95", "gms", "gss", "xml", "rss", "xjb", "xsd",
    "xsl", "svg", "hbs", "ini", "jsp", "jsx", "tex", "lua", "mak", "mkd", "mma", "mel", "nix",
    "php", "txt", "ps1", "gyp", "kdb", "qml", "rib", "rsl", "irb", "SAS", "sas", "sql", "p21",
    "stp", "sci", "sml", "tcl", "tap", "vbs", "vim", "tao", "yml", "zep", "1c", "as", "sh",
    "bf", "cs", "cc", "hh", "cr", "fs", "nc", "go", "hs", "hx", "hy", "i7", "js", "kt", "ls",
    "mk", "md", "wl", "ml", "mm", "pf", "pl", "pm", "ps", "pp", "py", "re", "rb", "rs", "st",
    "tk", "tp", "ts", "vb", "xl", "xq", "c", "h", "d", "k", "r", "v",
];

static LANGUAGE_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| SUPPORTED_LANGUAGES.into_iter().collect());

/// Exact, case-sensitive membership.
pub fn is_supported(language: &str) -> bool {
    LANGUAGE_SET.contains(language)
}

/// The language tag at the start of a fence's info string, if it is a registered one.
///
/// The tag runs up to the first whitespace or backtick.
pub fn leading_tag(info: &str) -> Option<&str> {
    let end = info
        .find(|c: char| c.is_whitespace() || c == '`')
        .unwrap_or(info.len());
    let tag = &info[..end];
    is_supported(tag).then_some(tag)
}
