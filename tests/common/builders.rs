//! AST builders, shaped like CPython's `ast` dumps

use pyxml::ast::{AstNode, Field};

// === Expressions ===

pub fn name(id: &str) -> AstNode {
    AstNode::new("Name")
        .with("id", id)
        .with("ctx", AstNode::new("Load"))
}

pub fn store(id: &str) -> AstNode {
    AstNode::new("Name")
        .with("id", id)
        .with("ctx", AstNode::new("Store"))
}

pub fn num(n: i64) -> AstNode {
    AstNode::new("Num").with("n", n)
}

pub fn string(s: &str) -> AstNode {
    AstNode::new("Str").with("s", s)
}

pub fn constant(value: impl Into<Field>) -> AstNode {
    AstNode::new("Constant")
        .with("value", value)
        .with("kind", Field::from(None::<AstNode>))
}

pub fn name_constant(value: impl Into<Field>) -> AstNode {
    AstNode::new("NameConstant").with("value", value)
}

pub fn joined_str(values: Vec<AstNode>) -> AstNode {
    AstNode::new("JoinedStr").with("values", values)
}

pub fn bin_op(left: AstNode, op: &str, right: AstNode) -> AstNode {
    AstNode::new("BinOp")
        .with("left", left)
        .with("op", AstNode::new(op))
        .with("right", right)
}

pub fn unary_op(op: &str, operand: AstNode) -> AstNode {
    AstNode::new("UnaryOp")
        .with("op", AstNode::new(op))
        .with("operand", operand)
}

pub fn bool_op(op: &str, values: Vec<AstNode>) -> AstNode {
    AstNode::new("BoolOp")
        .with("op", AstNode::new(op))
        .with("values", values)
}

pub fn compare(left: AstNode, ops: &[&str], comparators: Vec<AstNode>) -> AstNode {
    let ops: Vec<AstNode> = ops.iter().map(|op| AstNode::new(*op)).collect();
    AstNode::new("Compare")
        .with("left", left)
        .with("ops", ops)
        .with("comparators", comparators)
}

pub fn call(func: AstNode, args: Vec<AstNode>, keywords: Vec<AstNode>) -> AstNode {
    AstNode::new("Call")
        .with("func", func)
        .with("args", args)
        .with("keywords", keywords)
}

pub fn keyword(arg: Option<&str>, value: AstNode) -> AstNode {
    let arg = match arg {
        Some(arg) => Field::from(arg),
        None => Field::from(None::<AstNode>),
    };
    AstNode::new("keyword").with("arg", arg).with("value", value)
}

pub fn starred(value: AstNode) -> AstNode {
    AstNode::new("Starred")
        .with("value", value)
        .with("ctx", AstNode::new("Load"))
}

pub fn attribute(value: AstNode, attr: &str) -> AstNode {
    AstNode::new("Attribute")
        .with("value", value)
        .with("attr", attr)
        .with("ctx", AstNode::new("Load"))
}

fn sequence(kind: &str, elts: Vec<AstNode>, ctx: &str) -> AstNode {
    AstNode::new(kind)
        .with("elts", elts)
        .with("ctx", AstNode::new(ctx))
}

pub fn list(elts: Vec<AstNode>) -> AstNode {
    sequence("List", elts, "Load")
}

pub fn tuple(elts: Vec<AstNode>) -> AstNode {
    sequence("Tuple", elts, "Load")
}

pub fn store_tuple(elts: Vec<AstNode>) -> AstNode {
    sequence("Tuple", elts, "Store")
}

pub fn set(elts: Vec<AstNode>) -> AstNode {
    AstNode::new("Set").with("elts", elts)
}

pub fn dict(entries: Vec<(Option<AstNode>, AstNode)>) -> AstNode {
    let (keys, values): (Vec<Option<AstNode>>, Vec<AstNode>) = entries.into_iter().unzip();
    let keys: Vec<Field> = keys.into_iter().map(Field::from).collect();
    AstNode::new("Dict").with("keys", keys).with("values", values)
}

/// Attach location attributes
pub fn at(node: AstNode, start: (i64, i64), end: (i64, i64)) -> AstNode {
    node.with("lineno", start.0)
        .with("col_offset", start.1)
        .with("end_lineno", end.0)
        .with("end_col_offset", end.1)
}

/// Start position only, as in dumps from Pythons before 3.8
pub fn at_start(node: AstNode, start: (i64, i64)) -> AstNode {
    node.with("lineno", start.0).with("col_offset", start.1)
}

// === Statements ===

pub fn module(body: Vec<AstNode>) -> AstNode {
    AstNode::new("Module").with("body", body)
}

pub fn expr(value: AstNode) -> AstNode {
    AstNode::new("Expr").with("value", value)
}

pub fn assign(targets: Vec<AstNode>, value: AstNode) -> AstNode {
    AstNode::new("Assign")
        .with("targets", targets)
        .with("value", value)
}

pub fn aug_assign(target: AstNode, op: &str, value: AstNode) -> AstNode {
    AstNode::new("AugAssign")
        .with("target", target)
        .with("op", AstNode::new(op))
        .with("value", value)
}

pub fn pass() -> AstNode {
    AstNode::new("Pass")
}

pub fn return_(value: Option<AstNode>) -> AstNode {
    AstNode::new("Return").with("value", value)
}

pub fn alias(name: &str, asname: Option<&str>) -> AstNode {
    let asname = match asname {
        Some(asname) => Field::from(asname),
        None => Field::from(None::<AstNode>),
    };
    AstNode::new("alias").with("name", name).with("asname", asname)
}

pub fn import(names: Vec<AstNode>) -> AstNode {
    AstNode::new("Import").with("names", names)
}

pub fn import_from(module: Option<&str>, names: Vec<AstNode>, level: i64) -> AstNode {
    let module = match module {
        Some(module) => Field::from(module),
        None => Field::from(None::<AstNode>),
    };
    AstNode::new("ImportFrom")
        .with("module", module)
        .with("names", names)
        .with("level", level)
}

pub fn arg(name: &str) -> AstNode {
    AstNode::new("arg")
        .with("arg", name)
        .with("annotation", None::<AstNode>)
}

pub fn annotated_arg(name: &str, annotation: AstNode) -> AstNode {
    AstNode::new("arg")
        .with("arg", name)
        .with("annotation", annotation)
}

pub fn arguments(args: Vec<AstNode>, defaults: Vec<AstNode>) -> AstNode {
    AstNode::new("arguments")
        .with("posonlyargs", Vec::<AstNode>::new())
        .with("args", args)
        .with("vararg", None::<AstNode>)
        .with("kwonlyargs", Vec::<AstNode>::new())
        .with("kw_defaults", Vec::<AstNode>::new())
        .with("kwarg", None::<AstNode>)
        .with("defaults", defaults)
}

pub fn function_def(
    name: &str,
    args: AstNode,
    body: Vec<AstNode>,
    decorators: Vec<AstNode>,
    returns: Option<AstNode>,
) -> AstNode {
    AstNode::new("FunctionDef")
        .with("name", name)
        .with("args", args)
        .with("body", body)
        .with("decorator_list", decorators)
        .with("returns", returns)
}

pub fn if_(test: AstNode, body: Vec<AstNode>, orelse: Vec<AstNode>) -> AstNode {
    AstNode::new("If")
        .with("test", test)
        .with("body", body)
        .with("orelse", orelse)
}

pub fn while_(test: AstNode, body: Vec<AstNode>, orelse: Vec<AstNode>) -> AstNode {
    AstNode::new("While")
        .with("test", test)
        .with("body", body)
        .with("orelse", orelse)
}

pub fn kwonly_arguments(
    args: Vec<AstNode>,
    defaults: Vec<AstNode>,
    kwonly: Vec<AstNode>,
    kw_defaults: Vec<Option<AstNode>>,
) -> AstNode {
    let kw_defaults: Vec<Field> = kw_defaults.into_iter().map(Field::from).collect();
    AstNode::new("arguments")
        .with("posonlyargs", Vec::<AstNode>::new())
        .with("args", args)
        .with("vararg", None::<AstNode>)
        .with("kwonlyargs", kwonly)
        .with("kw_defaults", kw_defaults)
        .with("kwarg", None::<AstNode>)
        .with("defaults", defaults)
}
