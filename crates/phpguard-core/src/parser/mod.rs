//! Line-oriented structural parser for PHP sources.
//!
//! The parser makes one forward pass over the logical lines of a file (see
//! [`logical`]) and recognizes declarations with anchored patterns. It keeps
//! a running brace depth and remembers the open class together with the
//! depth that enclosed it. Lines that match nothing only move the depth.
//!
//! Documentation blocks are found by looking backwards from a declaration
//! line and parsed with [`doc::parse_doc_block`].

pub mod doc;
pub mod logical;

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{
    ClassEntity, ClassKind, ClassModifier, DocBlock, FunctionEntity, Import, ImportKind,
    ParameterEntity, PropertyEntity, SourceModel, Visibility,
};
use crate::source::split_lines;
use crate::utils::scan::{matching_paren, split_top_level, strip_attributes};
use crate::utils::static_regex;

use self::logical::{logical_lines, LogicalLine};

static STRICT_TYPES: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?i)declare\s*\(\s*strict_types\s*=\s*1\s*\)"));

static NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"(?i)^\s*namespace\s+\\?([A-Za-z_][A-Za-z0-9_\\]*)\s*[;{]")
});

static USE_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"(?i)^\s*use\s+(?:(function|const)\s+)?([^;]+?)\s*;")
});

static TRAIT_USE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?i)^\s*use\s+([^;{]+?)\s*[;{]"));

static USE_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"(?i)^(?:(function|const)\s+)?(\\?[A-Za-z_][A-Za-z0-9_]*(?:\\[A-Za-z_][A-Za-z0-9_]*)*)(?:\s+as\s+([A-Za-z_][A-Za-z0-9_]*))?$")
});

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"^\\?[A-Za-z_][A-Za-z0-9_]*(?:\\[A-Za-z_][A-Za-z0-9_]*)*$")
});

static CLASS_DECL: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(
        r"(?i)^\s*((?:(?:abstract|final|readonly)\s+)*)(class|interface|trait|enum)\s+([A-Za-z_][A-Za-z0-9_]*)",
    )
});

static EXTENDS: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"(?i)\bextends\s+(.+?)\s*(?:\bimplements\b|\{|$)")
});

static IMPLEMENTS: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?i)\bimplements\s+([^{]+)"));

static PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(
        r"(?i)^\s*((?:(?:public|protected|private)(?:\(set\))?\s+|var\s+|static\s+|readonly\s+|final\s+|abstract\s+)+)([^$=;]*?)\s*(\$[A-Za-z_][A-Za-z0-9_]*.*)",
    )
});

static PROPERTY_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"^\s*\$([A-Za-z_][A-Za-z0-9_]*)(?:\s*=\s*(.*?))?\s*$")
});

static FUNCTION_DECL: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(
        r"(?i)^\s*((?:(?:abstract|final|public|protected|private|static)\s+)*)function\s+&?\s*([A-Za-z_][A-Za-z0-9_]*)\s*\(",
    )
});

static RETURN_TYPE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"^\s*:\s*([^{;]+?)\s*(?:[{;]|$)"));

static PARAMETER: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(
        r"(?i)^((?:(?:public|protected|private)(?:\(set\))?\s+|readonly\s+)*)([^$]*?)\s*(&)?\s*(\.\.\.)?\s*\$([A-Za-z_][A-Za-z0-9_]*)(?:\s*=\s*(.+))?$",
    )
});

static ACCESS_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?i)\b(public|protected|private)\b(\(set\))?"));

static FUNCTION_OR_CONST: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?i)\b(?:function|const)\b"));

/// Parses a whole source text.
#[must_use]
pub fn parse_source(text: &str) -> SourceModel {
    parse(&split_lines(text))
}

/// Parses source lines (without terminators) into a [`SourceModel`].
#[must_use]
pub fn parse(lines: &[String]) -> SourceModel {
    let mut state = ParserState::new(lines);
    for line in logical_lines(lines) {
        state.process(&line);
    }
    state.finish()
}

/// The class currently being filled.
#[derive(Debug)]
struct OpenClass {
    index: usize,
    depth: i64,
    body_seen: bool,
}

/// Mutable state of one parse.
#[derive(Debug)]
struct ParserState<'a> {
    lines: &'a [String],
    depth: i64,
    open_class: Option<OpenClass>,
    model: SourceModel,
}

impl<'a> ParserState<'a> {
    fn new(lines: &'a [String]) -> Self {
        Self {
            lines,
            depth: 0,
            open_class: None,
            model: SourceModel::default(),
        }
    }

    fn finish(mut self) -> SourceModel {
        self.model.final_depth = self.depth;
        self.model
    }

    fn process(&mut self, line: &LogicalLine) {
        let depth_before = self.depth;
        self.depth += line.brace_delta;

        if !line.in_comment {
            self.detect_strict_types(line);
            self.detect_namespace(line);
            self.detect_use(line);
            let decl = strip_attributes(&line.text);
            if self.open_class.is_none() {
                self.detect_class(line, decl, depth_before);
            }
            self.detect_property(line, decl, depth_before);
            self.detect_function(line, decl, depth_before);
        }

        self.close_class(line);
    }

    fn current_class(&self) -> Option<&ClassEntity> {
        self.open_class
            .as_ref()
            .and_then(|open| self.model.classes.get(open.index))
    }

    /// Whether `depth` is directly inside the open class body.
    fn at_class_body(&self, depth: i64) -> bool {
        self.open_class
            .as_ref()
            .is_some_and(|open| depth == open.depth + 1)
    }

    fn detect_strict_types(&mut self, line: &LogicalLine) {
        if STRICT_TYPES.is_match(&line.text) {
            self.model.strict_types = true;
        }
    }

    fn detect_namespace(&mut self, line: &LogicalLine) {
        if let Some(caps) = NAMESPACE.captures(&line.text) {
            self.model.namespace = Some(caps[1].trim_end_matches('\\').to_string());
        }
    }

    fn detect_use(&mut self, line: &LogicalLine) {
        if let Some(open) = &self.open_class {
            let Some(caps) = TRAIT_USE.captures(&line.text) else {
                return;
            };
            let index = open.index;
            for name in caps[1].split(',') {
                let name = name.trim();
                if QUALIFIED_NAME.is_match(name) {
                    self.model.classes[index].add_trait(name.trim_start_matches('\\'));
                }
            }
            return;
        }

        let Some(caps) = USE_STATEMENT.captures(&line.text) else {
            return;
        };
        let kind = import_kind(caps.get(1).map(|m| m.as_str()));
        let body = caps[2].trim();

        if let Some(open) = body.find('{') {
            let prefix = body[..open].trim().trim_end_matches('\\');
            let Some(close) = body.rfind('}') else {
                return;
            };
            for item in body[open + 1..close].split(',') {
                let item = item.trim();
                if item.is_empty() {
                    continue;
                }
                self.push_import(line.start, item, kind, Some(prefix));
            }
        } else {
            for item in body.split(',') {
                self.push_import(line.start, item.trim(), kind, None);
            }
        }
    }

    fn push_import(&mut self, line: usize, item: &str, kind: ImportKind, prefix: Option<&str>) {
        let Some(caps) = USE_ITEM.captures(item) else {
            return;
        };
        let kind = caps
            .get(1)
            .map_or(kind, |m| import_kind(Some(m.as_str())));
        let name = caps[2].trim_start_matches('\\');
        let full_name = match prefix {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}\\{name}"),
            _ => name.to_string(),
        };
        let alias = caps.get(3).map(|m| m.as_str().to_string());
        self.model
            .imports
            .push(Import::new(line, &full_name, alias, kind));
    }

    fn detect_class(&mut self, line: &LogicalLine, decl: &str, depth_before: i64) {
        let Some(caps) = CLASS_DECL.captures(decl) else {
            return;
        };
        let Some(kind) = ClassKind::from_keyword(&caps[2]) else {
            return;
        };

        let mut class = ClassEntity::new(&caps[3], kind, line.start);
        for modifier in caps[1].split_whitespace() {
            match modifier.to_ascii_lowercase().as_str() {
                "abstract" => class.modifier = Some(ClassModifier::Abstract),
                "final" => class.modifier = Some(ClassModifier::Final),
                "readonly" => class.readonly = true,
                _ => {}
            }
        }
        class.namespace.clone_from(&self.model.namespace);

        let header = &decl[caps.get(0).map_or(0, |m| m.end())..];
        if let Some(ext) = EXTENDS.captures(header) {
            let mut names = ext[1]
                .split(',')
                .map(str::trim)
                .filter(|n| QUALIFIED_NAME.is_match(n));
            class.parent = names.next().map(String::from);
            for extra in names {
                class.add_interface(extra);
            }
        }
        if let Some(imp) = IMPLEMENTS.captures(header) {
            for name in imp[1].split(',').map(str::trim) {
                if QUALIFIED_NAME.is_match(name) {
                    class.add_interface(name);
                }
            }
        }
        class.doc = self.doc_before(line.start);

        self.model.classes.push(class);
        self.open_class = Some(OpenClass {
            index: self.model.classes.len() - 1,
            depth: depth_before,
            body_seen: line.code.contains('{'),
        });
    }

    fn detect_property(&mut self, line: &LogicalLine, decl: &str, depth_before: i64) {
        if !self.at_class_body(depth_before) || FUNCTION_OR_CONST.is_match(decl) {
            return;
        }
        let Some(caps) = PROPERTY.captures(decl) else {
            return;
        };
        let Some(class) = self.current_class() else {
            return;
        };

        let modifiers = caps[1].to_ascii_lowercase();
        let visibility = visibility_of(&modifiers).unwrap_or(Visibility::Public);
        let is_static = modifiers.split_whitespace().any(|m| m == "static");
        let readonly = class.is_readonly() || modifiers.split_whitespace().any(|m| m == "readonly");
        let declared_type = Some(caps[2].trim())
            .filter(|t| !t.is_empty())
            .map(String::from);
        let class_name = class.name().to_string();
        let doc = self.doc_before(line.start);

        let names = split_top_level(&caps[3], ';');
        let names = names.first().copied().unwrap_or_default();
        for item in split_top_level(hook_free(names), ',') {
            let Some(item) = PROPERTY_ITEM.captures(item) else {
                continue;
            };
            let mut property = PropertyEntity::new(&item[1], &class_name, line.start);
            property.visibility = visibility;
            property.is_static = is_static;
            property.readonly = readonly;
            property.declared_type.clone_from(&declared_type);
            property.default = item
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|d| !d.is_empty());
            property.doc.clone_from(&doc);
            self.model.properties.push(property);
        }
    }

    fn detect_function(&mut self, line: &LogicalLine, decl: &str, depth_before: i64) {
        let Some(caps) = FUNCTION_DECL.captures(decl) else {
            return;
        };
        let Some(whole) = caps.get(0) else {
            return;
        };
        let open = whole.end() - 1;
        let Some(close) = matching_paren(decl, open) else {
            return;
        };

        let modifiers = caps[1].to_ascii_lowercase();
        let mut function = FunctionEntity::new(&caps[2], line.start);
        let owner = if self.at_class_body(depth_before) {
            self.current_class().map(|c| c.name().to_string())
        } else {
            None
        };

        if owner.is_some() {
            function.visibility = Some(visibility_of(&modifiers).unwrap_or(Visibility::Public));
        }
        function.is_static = modifiers.split_whitespace().any(|m| m == "static");
        function.is_abstract = modifiers.split_whitespace().any(|m| m == "abstract");

        let promotes = owner.is_some() && function.name.eq_ignore_ascii_case("__construct");
        for raw in split_top_level(&decl[open + 1..close], ',') {
            if let Some(param) = parse_parameter(raw, promotes) {
                function.add_parameter(param);
            }
        }

        if let Some(ret) = RETURN_TYPE.captures(&decl[close + 1..]) {
            function.return_type = Some(ret[1].trim().to_string());
            function.has_return_type = true;
        }

        function.class_name = owner;
        function.doc = self.doc_before(line.start);
        self.model.functions.push(function);
    }

    fn close_class(&mut self, line: &LogicalLine) {
        let Some(open) = self.open_class.as_mut() else {
            return;
        };
        if self.depth > open.depth {
            open.body_seen = true;
            return;
        }
        if !open.body_seen {
            return;
        }
        let index = open.index;
        self.open_class = None;
        if let Some(class) = self.model.classes.get_mut(index) {
            class.close(line.end);
        }
    }

    /// Finds the documentation block that ends right above `line` (1-based).
    ///
    /// Blank lines and attribute lines in between are skipped.
    fn doc_before(&self, line: usize) -> Option<DocBlock> {
        let mut idx = line.checked_sub(2)?;

        loop {
            let trimmed = self.lines.get(idx)?.trim();
            if !trimmed.is_empty() && !trimmed.starts_with("#[") {
                break;
            }
            idx = idx.checked_sub(1)?;
        }

        let end = idx;
        let last = self.lines[end].trim();
        if !last.ends_with("*/") {
            return None;
        }

        let start = if last.starts_with("/**") {
            if last == "/**/" {
                return None;
            }
            end
        } else {
            let mut cursor = end;
            loop {
                cursor = cursor.checked_sub(1)?;
                let trimmed = self.lines[cursor].trim();
                if trimmed.starts_with("/**") {
                    break cursor;
                }
                if !trimmed.is_empty() && !trimmed.starts_with('*') {
                    return None;
                }
            }
        };

        let text = self.lines[start..=end].join("\n");
        Some(doc::parse_doc_block(&text, start + 1, end + 1))
    }
}

fn import_kind(keyword: Option<&str>) -> ImportKind {
    match keyword.map(str::to_ascii_lowercase).as_deref() {
        Some("function") => ImportKind::Function,
        Some("const") => ImportKind::Const,
        _ => ImportKind::Class,
    }
}

/// The first access keyword that is not an asymmetric `(set)` visibility.
fn visibility_of(modifiers: &str) -> Option<Visibility> {
    ACCESS_KEYWORD
        .captures_iter(modifiers)
        .filter(|caps| caps.get(2).is_none())
        .find_map(|caps| Visibility::from_keyword(&caps[1]))
}

/// Cuts a property hook block (`$name { get => ... }`) off a declaration.
fn hook_free(text: &str) -> &str {
    match (text.find('{'), text.find('=')) {
        (Some(brace), Some(eq)) if brace < eq => &text[..brace],
        (Some(brace), None) => &text[..brace],
        _ => text,
    }
}

fn parse_parameter(raw: &str, promotes: bool) -> Option<ParameterEntity> {
    let text = strip_attributes(raw);
    if text.is_empty() || text.starts_with("#[") {
        return None;
    }
    let caps = PARAMETER.captures(text)?;

    let modifiers = caps[1].to_ascii_lowercase();
    let mut ty = caps[2].trim();
    let mut nullable = false;
    if let Some(rest) = ty.strip_prefix('?') {
        nullable = true;
        ty = rest.trim_start();
    }
    if split_top_level(ty, '|')
        .iter()
        .any(|member| member.trim().eq_ignore_ascii_case("null"))
    {
        nullable = true;
    }

    let mut param = ParameterEntity::new(&caps[5]);
    param.nullable = nullable;
    param.declared_type = Some(ty).filter(|t| !t.is_empty()).map(String::from);
    param.default = caps.get(6).map(|m| m.as_str().trim().to_string());
    param.by_reference = caps.get(3).is_some();
    param.variadic = caps.get(4).is_some();
    param.promoted = promotes && ACCESS_KEYWORD.is_match(&modifiers);
    Some(param)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(src: &str) -> SourceModel {
        parse_source(src)
    }

    #[test]
    fn empty_input() {
        let model = parse_str("");
        assert_eq!(model, SourceModel::default());
    }

    #[test]
    fn namespace_imports_and_strict_types() {
        let model = parse_str(
            "<?php\n\ndeclare(strict_types=1);\n\nnamespace App\\Http;\n\nuse App\\Models\\User;\nuse Psr\\Log\\LoggerInterface as Logger;\nuse App\\Support\\{Str, Arr as A};\nuse function App\\helpers\\format;\nuse const App\\LIMIT, App\\OTHER;\n",
        );
        assert!(model.strict_types);
        assert_eq!(model.namespace.as_deref(), Some("App\\Http"));

        let names: Vec<(&str, &str, ImportKind)> = model
            .imports
            .iter()
            .map(|i| (i.full_name(), i.effective_name(), i.kind()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("App\\Models\\User", "User", ImportKind::Class),
                ("Psr\\Log\\LoggerInterface", "Logger", ImportKind::Class),
                ("App\\Support\\Str", "Str", ImportKind::Class),
                ("App\\Support\\Arr", "A", ImportKind::Class),
                ("App\\helpers\\format", "format", ImportKind::Function),
                ("App\\LIMIT", "LIMIT", ImportKind::Const),
                ("App\\OTHER", "OTHER", ImportKind::Const),
            ]
        );
        assert_eq!(model.imports[2].line(), 9);
    }

    #[test]
    fn class_header_and_bounds() {
        let model = parse_str(
            "<?php\nnamespace App;\n\n/**\n * A user.\n */\nfinal class User extends Model implements JsonSerializable, \\Countable\n{\n    use HasName, SoftDeletes;\n\n    public function count(): int\n    {\n        return 1;\n    }\n}\n",
        );
        assert_eq!(model.classes.len(), 1);
        let class = &model.classes[0];
        assert_eq!(class.name(), "User");
        assert_eq!(class.kind(), ClassKind::Class);
        assert_eq!(class.modifier(), Some(ClassModifier::Final));
        assert_eq!(class.parent(), Some("Model"));
        assert_eq!(class.interfaces(), ["JsonSerializable", "\\Countable"]);
        assert_eq!(class.traits(), ["HasName", "SoftDeletes"]);
        assert_eq!(class.namespace(), Some("App"));
        assert_eq!(class.start_line(), 7);
        assert_eq!(class.end_line(), Some(15));
        assert_eq!(class.doc().map(DocBlock::summary), Some("A user."));
        assert_eq!(model.final_depth, 0);
        assert!(model.imports.is_empty());
    }

    #[test]
    fn one_line_class_closes_on_its_line() {
        let model = parse_str("<?php\nclass fooBar {}\nclass Other {}\n");
        assert_eq!(model.classes.len(), 2);
        assert_eq!(model.classes[0].end_line(), Some(2));
        assert_eq!(model.classes[1].start_line(), 3);
        assert_eq!(model.classes[1].end_line(), Some(3));
    }

    #[test]
    fn unterminated_class_has_no_end() {
        let model = parse_str("<?php\nclass Broken {\n    public function f() {\n");
        assert_eq!(model.classes[0].end_line(), None);
        assert_eq!(model.final_depth, 2);
    }

    #[test]
    fn braces_in_strings_and_comments_are_ignored() {
        let model = parse_str(
            "<?php\nclass A {\n    public function f() {\n        $s = \"{\"; // }\n        /* { */\n        return '}';\n    }\n}\n",
        );
        assert_eq!(model.classes[0].end_line(), Some(8));
        assert_eq!(model.final_depth, 0);
    }

    #[test]
    fn nested_closures_keep_depth() {
        let model = parse_str(
            "<?php\nclass A\n{\n    public function run(): callable\n    {\n        return function () {\n            return array_map(function ($x) {\n                return $x;\n            }, []);\n        };\n    }\n\n    public function after(): void {}\n}\n",
        );
        let class = &model.classes[0];
        assert_eq!(class.end_line(), Some(14));
        let names: Vec<String> = model.functions.iter().map(FunctionEntity::qualified_name).collect();
        assert_eq!(names, ["A::run", "A::after"]);
        assert_eq!(model.final_depth, 0);
    }

    #[test]
    fn properties() {
        let model = parse_str(
            "<?php\nreadonly class Point\n{\n    /** @var int */\n    public int $x = 0;\n    protected static ?string $label;\n    private array $tags = ['a', 'b'];\n    var $legacy;\n    public private(set) string $name;\n    const LIMIT = 1;\n    public function f() {\n        static $cache = [];\n    }\n}\n",
        );
        let props: Vec<(&str, Visibility, Option<&str>)> = model
            .properties
            .iter()
            .map(|p| (p.name(), p.visibility(), p.declared_type()))
            .collect();
        assert_eq!(
            props,
            vec![
                ("x", Visibility::Public, Some("int")),
                ("label", Visibility::Protected, Some("?string")),
                ("tags", Visibility::Private, Some("array")),
                ("legacy", Visibility::Public, None),
                ("name", Visibility::Public, Some("string")),
            ]
        );
        assert!(model.properties.iter().all(PropertyEntity::is_readonly));
        assert!(model.properties[1].is_static());
        assert_eq!(model.properties[0].default_value(), Some("0"));
        assert_eq!(model.properties[2].default_value(), Some("['a', 'b']"));
        assert!(model.properties[0].doc().is_some_and(|d| d.var().is_some()));
        assert_eq!(model.properties[0].class_name(), "Point");
    }

    #[test]
    fn multi_name_property_declaration() {
        let model = parse_str(
            "<?php\nclass Pair\n{\n    public int $a = 1, $b = 2;\n    private static $x, $y;\n    public array $map = ['k' => 1, 'v' => 2], $empty;\n}\n",
        );
        let props: Vec<(&str, Option<&str>, Option<&str>)> = model
            .properties
            .iter()
            .map(|p| (p.name(), p.declared_type(), p.default_value()))
            .collect();
        assert_eq!(
            props,
            vec![
                ("a", Some("int"), Some("1")),
                ("b", Some("int"), Some("2")),
                ("x", None, None),
                ("y", None, None),
                ("map", Some("array"), Some("['k' => 1, 'v' => 2]")),
                ("empty", Some("array"), None),
            ]
        );
        assert!(model.properties[3].is_static());
        assert_eq!(model.properties[3].visibility(), Visibility::Private);
        assert!(model.properties.iter().all(|p| p.line() >= 4));
    }

    #[test]
    fn property_hook_is_not_a_default() {
        let model = parse_str(
            "<?php\nclass User\n{\n    public string $name { get => strtoupper($this->name); }\n}\n",
        );
        assert_eq!(model.properties.len(), 1);
        assert_eq!(model.properties[0].name(), "name");
        assert_eq!(model.properties[0].default_value(), None);
    }

    #[test]
    fn inline_attributes_before_declarations() {
        let model = parse_str(
            "<?php\n#[Entity] final class Order\n{\n    #[ORM\\Column(type: 'integer')] private int $id;\n    #[Required] #[Inject] public ?Logger $logger = null;\n    #[Route('/orders[/]', methods: ['GET'])] public function list(): array\n    {\n        return [];\n    }\n    #[Override]\n    public function __toString(): string { return ''; }\n}\n",
        );
        assert_eq!(model.classes.len(), 1);
        assert_eq!(model.classes[0].name(), "Order");
        assert_eq!(model.classes[0].modifier(), Some(ClassModifier::Final));

        let props: Vec<(&str, Visibility)> = model
            .properties
            .iter()
            .map(|p| (p.name(), p.visibility()))
            .collect();
        assert_eq!(props, [("id", Visibility::Private), ("logger", Visibility::Public)]);
        assert_eq!(model.properties[1].default_value(), Some("null"));

        let list = &model.functions[0];
        assert_eq!(list.name(), "list");
        assert_eq!(list.line(), 6);
        assert_eq!(list.class_name(), Some("Order"));
        assert_eq!(list.return_type(), Some("array"));
        assert_eq!(model.functions[1].name(), "__toString");
        assert_eq!(model.classes[0].end_line(), Some(12));
    }

    #[test]
    fn multiline_signature_after_inline_attribute() {
        let model = parse_str(
            "<?php\nclass Api\n{\n    #[Get] public function show(\n        int $id,\n    ): Response {\n    }\n}\n",
        );
        let show = &model.functions[0];
        assert_eq!(show.name(), "show");
        assert!(show.parameter("id").is_some());
        assert_eq!(show.return_type(), Some("Response"));
        assert_eq!(model.classes[0].end_line(), Some(8));
    }

    #[test]
    fn function_signature_details() {
        let model = parse_str(
            "<?php\nfunction f(?int $a, string|null $b = null, array<int, string> $c = [], &$d, Foo ...$rest): ?array {}\n",
        );
        let f = &model.functions[0];
        assert_eq!(f.visibility(), None);
        assert_eq!(f.return_type(), Some("?array"));
        assert!(f.has_return_type());

        let a = f.parameter("a");
        assert!(a.is_some_and(|p| p.is_nullable() && p.declared_type() == Some("int")));
        let b = f.parameter("b");
        assert!(b.is_some_and(|p| p.is_nullable() && p.default_value() == Some("null")));
        let c = f.parameter("c");
        assert_eq!(c.and_then(ParameterEntity::declared_type), Some("array<int, string>"));
        let d = f.parameter("d");
        assert!(d.is_some_and(|p| p.is_by_reference() && p.declared_type().is_none()));
        let rest = f.parameter("rest");
        assert!(rest.is_some_and(|p| p.is_variadic() && p.declared_type() == Some("Foo")));
        assert_eq!(f.parameters().len(), 5);
    }

    #[test]
    fn multiline_constructor_with_promotion() {
        let model = parse_str(
            "<?php\nclass Service\n{\n    public function __construct(\n        private readonly Logger $logger,\n        #[SensitiveParameter] string $secret,\n        protected int $retries = 3,\n    ) {\n    }\n}\n",
        );
        let ctor = &model.functions[0];
        assert_eq!(ctor.line(), 4);
        assert_eq!(ctor.visibility(), Some(Visibility::Public));
        assert!(!ctor.has_return_type());
        let promoted: Vec<(&str, bool)> = ctor
            .parameters()
            .values()
            .map(|p| (p.name(), p.is_promoted()))
            .collect();
        assert_eq!(promoted, [("logger", true), ("secret", false), ("retries", true)]);
        assert_eq!(model.classes[0].end_line(), Some(10));
    }

    #[test]
    fn method_modifiers() {
        let model = parse_str(
            "<?php\nabstract class Base\n{\n    abstract protected function build(int $x): string;\n    final public static function make() {}\n    function implicit() {}\n}\nfunction free() {}\n",
        );
        let build = &model.functions[0];
        assert!(build.is_abstract());
        assert_eq!(build.visibility(), Some(Visibility::Protected));
        assert_eq!(build.return_type(), Some("string"));
        assert!(model.functions[1].is_static());
        assert_eq!(model.functions[2].visibility(), Some(Visibility::Public));
        assert_eq!(model.functions[3].class_name(), None);
        assert_eq!(model.classes[0].modifier(), Some(ClassModifier::Abstract));
    }

    #[test]
    fn interface_extends_many() {
        let model = parse_str("<?php\ninterface Repo extends Countable, IteratorAggregate\n{\n}\n");
        let class = &model.classes[0];
        assert_eq!(class.kind(), ClassKind::Interface);
        assert_eq!(class.parent(), Some("Countable"));
        assert_eq!(class.interfaces(), ["IteratorAggregate"]);
        assert_eq!(class.end_line(), Some(4));
    }

    #[test]
    fn doc_lookup_rules() {
        let model = parse_str(
            "<?php\n/**\n * Documented.\n */\n#[Pure]\n\nfunction a() {}\n\n/* plain comment */\nfunction b() {}\n\n/**/\nfunction c() {}\n\n/** @return int */\nfunction d() {}\n\n/**\n * Broken\n$x = 1;\n */\nfunction e() {}\n",
        );
        let docs: Vec<Option<usize>> = model
            .functions
            .iter()
            .map(|f| f.doc().map(DocBlock::start_line))
            .collect();
        assert_eq!(docs, [Some(2), None, None, Some(15), None]);
        assert_eq!(model.functions[0].doc().map(DocBlock::end_line), Some(4));
    }

    #[test]
    fn commented_declarations_are_ignored() {
        let model = parse_str("<?php\n/*\nclass Hidden {\nfunction nope() {}\n*/\n// function alsoNot() {}\n");
        assert!(model.classes.is_empty());
        assert!(model.functions.is_empty());
    }

    #[test]
    fn malformed_declaration_is_skipped() {
        let model = parse_str("<?php\nfunction (\nclass {\n$x = function () {};\n");
        assert!(model.functions.is_empty());
        assert!(model.classes.is_empty());
    }
}
