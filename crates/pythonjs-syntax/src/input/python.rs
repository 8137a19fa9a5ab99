//! Tree-sitter based Python reader.
//!
//! Reads the Python 2 dialect the translator targets: `print` is a statement
//! (a bare `print(...)` call statement is read as one too), `except E, e:` is
//! accepted, and negative numeric literals fold into a single `Num` the way
//! the Python 2 parser does. Constructs the translator has no rendering for are
//! rejected here with their line number rather than being dropped.

use crate::traits::{ReadError, Reader};
use crate::tree::*;
use tree_sitter::{Node, Parser, Tree};

/// Static instance of the Python reader for registry.
pub static PYTHON_READER: PythonReader = PythonReader;

/// Python reader using tree-sitter.
pub struct PythonReader;

impl Reader for PythonReader {
    fn language(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn read(&self, source: &str) -> Result<Module, ReadError> {
        read_python(source)
    }
}

/// Parse Python source into a module tree.
pub fn read_python(source: &str) -> Result<Module, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_python::language().into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))?;

    let ctx = ReadContext::new(source);
    ctx.read_module(&tree)
}

struct ReadContext<'a> {
    source: &'a str,
}

/// Named children of a node, skipping comments.
fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect()
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error)
}

fn line(node: Node) -> usize {
    node.start_position().row + 1
}

impl<'a> ReadContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>, ReadError> {
        node.child_by_field_name(name)
            .ok_or_else(|| ReadError::Parse(format!("{} missing {name}", node.kind())))
    }

    fn unsupported(&self, node: Node, what: &str) -> ReadError {
        ReadError::Unsupported(format!("{what} at line {}", line(node)))
    }

    fn read_module(&self, tree: &Tree) -> Result<Module, ReadError> {
        let root = tree.root_node();

        if root.has_error() {
            let at = first_error(root).map(line).unwrap_or(1);
            return Err(ReadError::Parse(format!("syntax error at line {at}")));
        }

        Ok(Module::new(self.read_block_stmts(root)?))
    }

    fn read_block_stmts(&self, node: Node) -> Result<Vec<Stmt>, ReadError> {
        let mut stmts = Vec::new();
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            if child.is_named() {
                if let Some(stmt) = self.read_stmt(child)? {
                    stmts.push(stmt);
                }
            }
        }

        Ok(stmts)
    }

    fn read_stmt(&self, node: Node) -> Result<Option<Stmt>, ReadError> {
        match node.kind() {
            "comment" => {
                tracing::debug!(line = line(node), "skipping comment");
                Ok(None)
            }

            "expression_statement" => self.read_expression_statement(node).map(Some),

            "if_statement" => self.read_if_statement(node).map(Some),
            "while_statement" => self.read_while_statement(node).map(Some),
            "for_statement" => self.read_for_statement(node).map(Some),
            "try_statement" => self.read_try_statement(node).map(Some),

            "function_definition" => self
                .read_function_definition(node, Vec::new())
                .map(|def| Some(Stmt::FunctionDef(def))),
            "decorated_definition" => self.read_decorated_definition(node).map(Some),

            "return_statement" => self.read_return_statement(node).map(Some),
            "raise_statement" => self.read_raise_statement(node).map(Some),
            "print_statement" => self.read_print_statement(node).map(Some),

            "import_statement" => self.read_import_statement(node).map(Some),
            "import_from_statement" => self.read_import_from_statement(node).map(Some),
            "future_import_statement" => {
                let names = self.read_import_names(node)?;
                Ok(Some(Stmt::ImportFrom {
                    module: Some("__future__".into()),
                    names,
                    level: 0,
                }))
            }

            "pass_statement" => Ok(Some(Stmt::Pass)),
            "break_statement" => Ok(Some(Stmt::Break)),
            "continue_statement" => Ok(Some(Stmt::Continue)),

            "class_definition" => Err(self.unsupported(node, "class definition")),
            "with_statement" => Err(self.unsupported(node, "with statement")),
            other => Err(self.unsupported(node, &format!("statement `{other}`"))),
        }
    }

    fn read_expression_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let children = named_children(node);
        match children.as_slice() {
            [] => Err(ReadError::Parse("expression_statement has no child".into())),
            [single] => match single.kind() {
                "assignment" => self.read_assignment(*single),
                "augmented_assignment" => self.read_augmented_assignment(*single),
                _ => {
                    let value = self.read_expr(*single)?;
                    self.print_call_as_statement(*single, value)
                }
            },
            many => {
                let elts = many
                    .iter()
                    .map(|c| self.read_expr(*c))
                    .collect::<Result<_, _>>()?;
                Ok(Stmt::expr(Expr::tuple(elts)))
            }
        }
    }

    /// `print(a, b)` on its own line is the print statement in Python 2.
    fn print_call_as_statement(&self, node: Node, value: Expr) -> Result<Stmt, ReadError> {
        match value {
            Expr::Call {
                func,
                args,
                keywords,
            } if matches!(func.as_ref(), Expr::Name { id } if id == "print") => {
                if !keywords.is_empty() {
                    return Err(self.unsupported(node, "print with keyword arguments"));
                }
                Ok(Stmt::print(args))
            }
            other => Ok(Stmt::expr(other)),
        }
    }

    fn read_assignment(&self, node: Node) -> Result<Stmt, ReadError> {
        // `a = b = 1` nests: assignment(left: a, right: assignment(left: b, right: 1))
        let mut targets = Vec::new();
        let mut current = node;
        loop {
            let left = self.field(current, "left")?;
            targets.push(self.read_target(left)?);

            let right = current
                .child_by_field_name("right")
                .ok_or_else(|| self.unsupported(current, "annotation without value"))?;
            if right.kind() == "assignment" {
                current = right;
                continue;
            }
            let value = self.read_expr(right)?;
            return Ok(Stmt::Assign { targets, value });
        }
    }

    fn read_augmented_assignment(&self, node: Node) -> Result<Stmt, ReadError> {
        let left = self.field(node, "left")?;
        let right = self.field(node, "right")?;
        let op_node = self.field(node, "operator")?;

        let op_text = self.node_text(op_node);
        let op = op_text
            .strip_suffix('=')
            .and_then(binary_operator)
            .ok_or_else(|| ReadError::Parse(format!("unknown augmented op: {op_text}")))?;

        Ok(Stmt::aug_assign(
            self.read_target(left)?,
            op,
            self.read_expr(right)?,
        ))
    }

    fn read_target(&self, node: Node) -> Result<Expr, ReadError> {
        match node.kind() {
            "pattern_list" | "tuple_pattern" | "list_pattern" => {
                let elts = named_children(node)
                    .into_iter()
                    .map(|c| self.read_target(c))
                    .collect::<Result<_, _>>()?;
                Ok(Expr::tuple(elts))
            }
            _ => self.read_expr(node),
        }
    }

    fn read_if_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let test = self.read_expr(self.field(node, "condition")?)?;
        let body = self.read_block_stmts(self.field(node, "consequence")?)?;

        let mut cursor = node.walk();
        let alternatives: Vec<_> = node
            .children_by_field_name("alternative", &mut cursor)
            .collect();

        // Fold `elif` clauses from the back into nested `If` statements.
        let mut orelse = Vec::new();
        for alt in alternatives.iter().rev() {
            match alt.kind() {
                "else_clause" => {
                    orelse = self.read_block_stmts(self.field(*alt, "body")?)?;
                }
                "elif_clause" => {
                    let test = self.read_expr(self.field(*alt, "condition")?)?;
                    let body = self.read_block_stmts(self.field(*alt, "consequence")?)?;
                    orelse = vec![Stmt::if_stmt(test, body, std::mem::take(&mut orelse))];
                }
                other => {
                    return Err(ReadError::UnexpectedNode {
                        expected: "elif_clause or else_clause".into(),
                        got: other.into(),
                    });
                }
            }
        }

        Ok(Stmt::if_stmt(test, body, orelse))
    }

    fn read_while_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        if node.child_by_field_name("alternative").is_some() {
            return Err(self.unsupported(node, "while-else"));
        }
        let test = self.read_expr(self.field(node, "condition")?)?;
        let body = self.read_block_stmts(self.field(node, "body")?)?;
        Ok(Stmt::while_loop(test, body))
    }

    fn read_for_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        if node.child(0).is_some_and(|c| c.kind() == "async") {
            return Err(self.unsupported(node, "async for"));
        }
        if node.child_by_field_name("alternative").is_some() {
            return Err(self.unsupported(node, "for-else"));
        }

        let target = self.read_target(self.field(node, "left")?)?;
        let iter = self.read_expr(self.field(node, "right")?)?;
        let body = self.read_block_stmts(self.field(node, "body")?)?;

        Ok(Stmt::For { target, iter, body })
    }

    fn read_try_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let body = self.read_block_stmts(self.field(node, "body")?)?;
        let mut handlers = Vec::new();
        let mut finalbody = Vec::new();

        for clause in named_children(node) {
            match clause.kind() {
                "block" => {}
                "except_clause" => handlers.push(self.read_except_clause(clause)?),
                "finally_clause" => {
                    let block = named_children(clause)
                        .into_iter()
                        .find(|c| c.kind() == "block")
                        .ok_or_else(|| ReadError::Parse("finally_clause missing block".into()))?;
                    finalbody = self.read_block_stmts(block)?;
                }
                "else_clause" => return Err(self.unsupported(clause, "try-else")),
                "except_group_clause" => return Err(self.unsupported(clause, "except*")),
                other => {
                    return Err(ReadError::UnexpectedNode {
                        expected: "except_clause or finally_clause".into(),
                        got: other.into(),
                    });
                }
            }
        }

        Ok(Stmt::TryExcept {
            body,
            handlers,
            finalbody,
        })
    }

    fn read_except_clause(&self, node: Node) -> Result<ExceptHandler, ReadError> {
        let parts = named_children(node);
        let (block, head) = parts
            .split_last()
            .filter(|(block, _)| block.kind() == "block")
            .ok_or_else(|| ReadError::Parse("except_clause missing block".into()))?;

        let (ty, name) = match head {
            [] => (None, None),
            // `except E as e` parses as a single as_pattern in some grammar versions
            [pattern] if pattern.kind() == "as_pattern" => {
                let inner = named_children(*pattern);
                let ty = inner
                    .first()
                    .map(|n| self.read_expr(*n))
                    .transpose()?;
                let name = inner
                    .get(1)
                    .map(|n| self.node_text(*n).trim().to_string());
                (ty, name)
            }
            [ty] => (Some(self.read_expr(*ty)?), None),
            [ty, name] => (
                Some(self.read_expr(*ty)?),
                Some(self.node_text(*name).to_string()),
            ),
            _ => return Err(self.unsupported(node, "except clause shape")),
        };

        Ok(ExceptHandler {
            ty,
            name,
            body: self.read_block_stmts(*block)?,
        })
    }

    fn read_decorated_definition(&self, node: Node) -> Result<Stmt, ReadError> {
        let mut decorators = Vec::new();
        for child in named_children(node) {
            if child.kind() == "decorator" {
                let expr = named_children(child)
                    .into_iter()
                    .next()
                    .ok_or_else(|| ReadError::Parse("decorator missing expression".into()))?;
                decorators.push(self.read_expr(expr)?);
            }
        }

        let definition = self.field(node, "definition")?;
        match definition.kind() {
            "function_definition" => Ok(Stmt::FunctionDef(
                self.read_function_definition(definition, decorators)?,
            )),
            _ => Err(self.unsupported(definition, "decorated class")),
        }
    }

    fn read_function_definition(
        &self,
        node: Node,
        decorators: Vec<Expr>,
    ) -> Result<FunctionDef, ReadError> {
        if node.child(0).is_some_and(|c| c.kind() == "async") {
            return Err(self.unsupported(node, "async def"));
        }

        let name = self.node_text(self.field(node, "name")?).to_string();
        let args = match node.child_by_field_name("parameters") {
            Some(params) => self.read_parameters(params)?,
            None => Vec::new(),
        };
        let body = self.read_block_stmts(self.field(node, "body")?)?;

        Ok(FunctionDef {
            name,
            args,
            body,
            decorators,
        })
    }

    /// Positional parameter names. Default values are not kept.
    fn read_parameters(&self, node: Node) -> Result<Vec<String>, ReadError> {
        let mut params = Vec::new();

        for child in named_children(node) {
            match child.kind() {
                "identifier" => params.push(self.node_text(child).to_string()),
                "default_parameter" | "typed_default_parameter" => {
                    params.push(self.node_text(self.field(child, "name")?).to_string());
                }
                "typed_parameter" => {
                    let name = named_children(child)
                        .into_iter()
                        .find(|c| c.kind() == "identifier")
                        .ok_or_else(|| self.unsupported(child, "typed splat parameter"))?;
                    params.push(self.node_text(name).to_string());
                }
                "list_splat_pattern" | "dictionary_splat_pattern" => {
                    return Err(self.unsupported(child, "variadic parameter"));
                }
                "keyword_separator" | "positional_separator" => {
                    return Err(self.unsupported(child, "parameter separator"));
                }
                other => {
                    return Err(self.unsupported(child, &format!("parameter `{other}`")));
                }
            }
        }

        Ok(params)
    }

    fn read_return_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let value = named_children(node)
            .into_iter()
            .next()
            .map(|n| self.read_expr(n))
            .transpose()?;
        Ok(Stmt::return_stmt(value))
    }

    fn read_raise_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        if node.child_by_field_name("cause").is_some() {
            return Err(self.unsupported(node, "raise ... from"));
        }
        let exc = named_children(node)
            .into_iter()
            .next()
            .map(|n| self.read_expr(n))
            .transpose()?;
        Ok(Stmt::raise(exc))
    }

    fn read_print_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let mut values = Vec::new();
        for child in named_children(node) {
            if child.kind() == "chevron" {
                return Err(self.unsupported(child, "print >>"));
            }
            values.push(self.read_expr(child)?);
        }
        Ok(Stmt::print(values))
    }

    fn read_import_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        Ok(Stmt::Import {
            names: self.read_import_names(node)?,
        })
    }

    fn read_import_from_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let module_node = self.field(node, "module_name")?;
        let text = self.node_text(module_node);
        let level = text.chars().take_while(|c| *c == '.').count() as u32;
        let module = Some(text.trim_start_matches('.').to_string()).filter(|m| !m.is_empty());

        let names = if named_children(node)
            .iter()
            .any(|c| c.kind() == "wildcard_import")
        {
            vec![Alias {
                name: "*".into(),
                asname: None,
            }]
        } else {
            self.read_import_names(node)?
        };

        Ok(Stmt::ImportFrom {
            module,
            names,
            level,
        })
    }

    fn read_import_names(&self, node: Node) -> Result<Vec<Alias>, ReadError> {
        let mut cursor = node.walk();
        let nodes: Vec<_> = node.children_by_field_name("name", &mut cursor).collect();

        nodes
            .into_iter()
            .map(|n| match n.kind() {
                "aliased_import" => Ok(Alias {
                    name: self.node_text(self.field(n, "name")?).to_string(),
                    asname: Some(self.node_text(self.field(n, "alias")?).to_string()),
                }),
                _ => Ok(Alias {
                    name: self.node_text(n).to_string(),
                    asname: None,
                }),
            })
            .collect()
    }

    fn read_expr(&self, node: Node) -> Result<Expr, ReadError> {
        match node.kind() {
            "identifier" => Ok(Expr::name(self.node_text(node))),
            "true" => Ok(Expr::name("True")),
            "false" => Ok(Expr::name("False")),
            "none" => Ok(Expr::name("None")),

            "integer" => self.read_integer(node),
            "float" => self.read_float(node),
            "string" => Ok(Expr::string(self.read_string(node)?)),
            "concatenated_string" => {
                let mut s = String::new();
                for part in named_children(node) {
                    s.push_str(&self.read_string(part)?);
                }
                Ok(Expr::string(s))
            }

            "binary_operator" => self.read_binary_operator(node),
            "comparison_operator" => self.read_comparison_operator(node),
            "boolean_operator" => self.read_boolean_operator(node),
            "not_operator" => Ok(Expr::unary(
                UnaryOperator::Not,
                self.read_expr(self.field(node, "argument")?)?,
            )),
            "unary_operator" => self.read_unary_operator(node),

            "call" => self.read_call(node),
            "attribute" => {
                let object = self.read_expr(self.field(node, "object")?)?;
                let attr = self.node_text(self.field(node, "attribute")?);
                Ok(Expr::attribute(object, attr))
            }
            "subscript" => self.read_subscript(node),

            "list" => Ok(Expr::list(self.read_elements(node)?)),
            "tuple" | "expression_list" => Ok(Expr::tuple(self.read_elements(node)?)),
            "dictionary" => self.read_dictionary(node),

            "parenthesized_expression" => {
                let inner = named_children(node).into_iter().next().ok_or_else(|| {
                    ReadError::Parse("parenthesized_expression missing inner".into())
                })?;
                self.read_expr(inner)
            }

            "lambda" => self.read_lambda(node),
            "yield" => self.read_yield(node),

            "conditional_expression" => Err(self.unsupported(node, "conditional expression")),
            "list_comprehension"
            | "dictionary_comprehension"
            | "set_comprehension"
            | "generator_expression" => Err(self.unsupported(node, "comprehension")),
            other => Err(self.unsupported(node, &format!("expression `{other}`"))),
        }
    }

    fn read_integer(&self, node: Node) -> Result<Expr, ReadError> {
        let text = self.node_text(node).replace('_', "");
        if text.ends_with(['j', 'J']) {
            return Err(self.unsupported(node, "imaginary literal"));
        }
        let text = text.trim_end_matches(['l', 'L']);

        let lower = text.to_ascii_lowercase();
        let parsed = if let Some(hex) = lower.strip_prefix("0x") {
            i64::from_str_radix(hex, 16).ok()
        } else if let Some(oct) = lower.strip_prefix("0o") {
            i64::from_str_radix(oct, 8).ok()
        } else if let Some(bin) = lower.strip_prefix("0b") {
            i64::from_str_radix(bin, 2).ok()
        } else if lower.len() > 1 && lower.starts_with('0') {
            // Python 2 octal: 017
            i64::from_str_radix(&lower[1..], 8).ok()
        } else {
            lower.parse::<i64>().ok()
        };

        match parsed {
            Some(n) => Ok(Expr::int(n)),
            None => text
                .parse::<f64>()
                .map(Expr::float)
                .map_err(|_| self.unsupported(node, "integer literal out of range")),
        }
    }

    fn read_float(&self, node: Node) -> Result<Expr, ReadError> {
        let text = self.node_text(node).replace('_', "");
        if text.ends_with(['j', 'J']) {
            return Err(self.unsupported(node, "imaginary literal"));
        }
        text.parse::<f64>()
            .map(Expr::float)
            .map_err(|err| ReadError::Parse(format!("bad float {text}: {err}")))
    }

    fn read_string(&self, node: Node) -> Result<String, ReadError> {
        if named_children(node)
            .iter()
            .any(|c| c.kind() == "interpolation")
        {
            return Err(self.unsupported(node, "f-string"));
        }

        let text = self.node_text(node);
        let quote_at = text
            .find(['"', '\''])
            .ok_or_else(|| ReadError::Parse(format!("string without quotes: {text}")))?;
        let (prefix, rest) = text.split_at(quote_at);
        let prefix = prefix.to_ascii_lowercase();
        if prefix.contains('f') {
            return Err(self.unsupported(node, "f-string"));
        }

        let quote = if rest.starts_with("\"\"\"") || rest.starts_with("'''") {
            &rest[..3]
        } else {
            &rest[..1]
        };
        let inner = rest
            .strip_prefix(quote)
            .and_then(|r| r.strip_suffix(quote))
            .ok_or_else(|| ReadError::Parse(format!("unterminated string: {text}")))?;

        if prefix.contains('r') {
            Ok(inner.to_string())
        } else {
            Ok(unescape(inner))
        }
    }

    fn read_binary_operator(&self, node: Node) -> Result<Expr, ReadError> {
        let left = self.field(node, "left")?;
        let right = self.field(node, "right")?;
        let op_node = self.field(node, "operator")?;

        let op = binary_operator(op_node.kind()).ok_or_else(|| {
            ReadError::Parse(format!("unknown binary op: {}", self.node_text(op_node)))
        })?;

        Ok(Expr::binop(self.read_expr(left)?, op, self.read_expr(right)?))
    }

    fn read_comparison_operator(&self, node: Node) -> Result<Expr, ReadError> {
        let mut operands = Vec::new();
        let mut ops = Vec::new();
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            if child.kind() == "comment" {
                continue;
            }
            if child.is_named() {
                operands.push(self.read_expr(child)?);
            } else {
                let op = match child.kind() {
                    "<" => CmpOp::Lt,
                    "<=" => CmpOp::LtE,
                    ">" => CmpOp::Gt,
                    ">=" => CmpOp::GtE,
                    "==" => CmpOp::Eq,
                    "!=" | "<>" => CmpOp::NotEq,
                    "is" => CmpOp::Is,
                    "is not" => CmpOp::IsNot,
                    "in" => CmpOp::In,
                    "not in" => CmpOp::NotIn,
                    other => {
                        return Err(ReadError::Parse(format!("unknown comparison op: {other}")));
                    }
                };
                ops.push(op);
            }
        }

        if operands.len() != ops.len() + 1 || ops.is_empty() {
            return Err(ReadError::Parse(
                "comparison needs operands around every operator".into(),
            ));
        }
        let left = operands.remove(0);

        Ok(Expr::Compare {
            left: Box::new(left),
            ops,
            comparators: operands,
        })
    }

    fn read_boolean_operator(&self, node: Node) -> Result<Expr, ReadError> {
        let op = match self.field(node, "operator")?.kind() {
            "and" => BoolOperator::And,
            "or" => BoolOperator::Or,
            other => return Err(ReadError::Parse(format!("unknown boolean op: {other}"))),
        };

        // `a and b and c` is left-nested in the grammar; flatten it like Python does.
        let left = self.field(node, "left")?;
        let mut values = match self.read_expr(left)? {
            Expr::BoolOp { op: inner, values } if inner == op && left.kind() == "boolean_operator" => {
                values
            }
            other => vec![other],
        };
        values.push(self.read_expr(self.field(node, "right")?)?);

        Ok(Expr::bool_op(op, values))
    }

    fn read_unary_operator(&self, node: Node) -> Result<Expr, ReadError> {
        let op_node = self.field(node, "operator")?;
        let arg = self.field(node, "argument")?;

        let op = match op_node.kind() {
            "-" => UnaryOperator::USub,
            "+" => UnaryOperator::UAdd,
            "~" => UnaryOperator::Invert,
            other => return Err(ReadError::Parse(format!("unknown unary op: {other}"))),
        };

        let operand = self.read_expr(arg)?;
        // The Python 2 parser folds `-<literal>` into a negative number.
        match (op, operand) {
            (UnaryOperator::USub, Expr::Num { n: Number::Int(n) }) if n != i64::MIN => {
                Ok(Expr::int(-n))
            }
            (UnaryOperator::USub, Expr::Num { n: Number::Float(n) }) => Ok(Expr::float(-n)),
            (op, operand) => Ok(Expr::unary(op, operand)),
        }
    }

    fn read_call(&self, node: Node) -> Result<Expr, ReadError> {
        let func = self.read_expr(self.field(node, "function")?)?;
        let arguments = self.field(node, "arguments")?;
        if arguments.kind() != "argument_list" {
            return Err(self.unsupported(arguments, "generator argument"));
        }

        let mut args = Vec::new();
        let mut keywords = Vec::new();
        for child in named_children(arguments) {
            match child.kind() {
                "keyword_argument" => {
                    let name = self.node_text(self.field(child, "name")?);
                    let value = self.read_expr(self.field(child, "value")?)?;
                    keywords.push(Keyword::new(name, value));
                }
                "list_splat" | "dictionary_splat" => {
                    return Err(self.unsupported(child, "argument unpacking"));
                }
                _ => args.push(self.read_expr(child)?),
            }
        }

        Ok(Expr::call_with_keywords(func, args, keywords))
    }

    fn read_subscript(&self, node: Node) -> Result<Expr, ReadError> {
        let value = self.read_expr(self.field(node, "value")?)?;

        let mut cursor = node.walk();
        let parts: Vec<_> = node.children_by_field_name("subscript", &mut cursor).collect();

        let slice = match parts.as_slice() {
            [single] => self.read_slice(*single)?,
            [] => return Err(ReadError::Parse("subscript missing subscript".into())),
            many => {
                let elts = many
                    .iter()
                    .map(|p| self.read_expr(*p))
                    .collect::<Result<_, _>>()?;
                Slice::Index {
                    value: Expr::tuple(elts),
                }
            }
        };

        Ok(Expr::Subscript {
            value: Box::new(value),
            slice: Box::new(slice),
        })
    }

    fn read_slice(&self, node: Node) -> Result<Slice, ReadError> {
        match node.kind() {
            "ellipsis" => Ok(Slice::Ellipsis),
            "slice" => {
                // lower:upper:step; position is decided by the colons seen so far.
                let mut bounds: [Option<Expr>; 3] = [None, None, None];
                let mut position = 0;
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if child.kind() == ":" {
                        position += 1;
                    } else if child.is_named() && position < 3 {
                        bounds[position] = Some(self.read_expr(child)?);
                    }
                }
                let [lower, upper, step] = bounds;
                Ok(Slice::Slice { lower, upper, step })
            }
            _ => Ok(Slice::Index {
                value: self.read_expr(node)?,
            }),
        }
    }

    fn read_elements(&self, node: Node) -> Result<Vec<Expr>, ReadError> {
        named_children(node)
            .into_iter()
            .map(|child| match child.kind() {
                "list_splat" => Err(self.unsupported(child, "unpacking in literal")),
                _ => self.read_expr(child),
            })
            .collect()
    }

    fn read_dictionary(&self, node: Node) -> Result<Expr, ReadError> {
        let mut entries = Vec::new();

        for child in named_children(node) {
            match child.kind() {
                "pair" => {
                    let key = self.read_expr(self.field(child, "key")?)?;
                    let value = self.read_expr(self.field(child, "value")?)?;
                    entries.push((key, value));
                }
                _ => return Err(self.unsupported(child, "dictionary unpacking")),
            }
        }

        Ok(Expr::dict(entries))
    }

    fn read_lambda(&self, node: Node) -> Result<Expr, ReadError> {
        let args = match node.child_by_field_name("parameters") {
            Some(params) => self.read_parameters(params)?,
            None => Vec::new(),
        };
        let body = self.read_expr(self.field(node, "body")?)?;
        Ok(Expr::lambda(args, body))
    }

    fn read_yield(&self, node: Node) -> Result<Expr, ReadError> {
        let mut cursor = node.walk();
        if node.children(&mut cursor).any(|c| c.kind() == "from") {
            return Err(self.unsupported(node, "yield from"));
        }
        let value = named_children(node)
            .into_iter()
            .next()
            .map(|n| self.read_expr(n))
            .transpose()?;
        Ok(Expr::yield_expr(value))
    }
}

fn binary_operator(token: &str) -> Option<Operator> {
    let op = match token {
        "+" => Operator::Add,
        "-" => Operator::Sub,
        "*" => Operator::Mult,
        "@" => Operator::MatMult,
        "/" => Operator::Div,
        "//" => Operator::FloorDiv,
        "%" => Operator::Mod,
        "**" => Operator::Pow,
        "<<" => Operator::LShift,
        ">>" => Operator::RShift,
        "|" => Operator::BitOr,
        "^" => Operator::BitXor,
        "&" => Operator::BitAnd,
        _ => return None,
    };
    Some(op)
}

/// Resolve backslash escapes of a non-raw string body.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0b}'),
            '0'..='7' => {
                let mut digits = String::from(next);
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                push_code(&mut out, &digits, 8);
            }
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars
                    .clone()
                    .take(width)
                    .take_while(|d| d.is_ascii_hexdigit())
                    .collect();
                if digits.len() == width && push_code(&mut out, &digits, 16) {
                    for _ in 0..width {
                        chars.next();
                    }
                } else {
                    out.push('\\');
                    out.push(next);
                }
            }
            other => {
                // Unknown escapes are kept verbatim.
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

fn push_code(out: &mut String, digits: &str, radix: u32) -> bool {
    match u32::from_str_radix(digits, radix).ok().and_then(char::from_u32) {
        Some(ch) => {
            out.push(ch);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_common_sequences() {
        assert_eq!(unescape(r"a\nb"), "a\nb");
        assert_eq!(unescape(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape(r"\x41\101B"), "AAB");
        assert_eq!(unescape(r"\0"), "\0");
        assert_eq!(unescape(r"keep \d"), "keep \\d");
        assert_eq!(unescape("line \\\ncontinued"), "line continued");
    }

    #[test]
    fn binary_operator_tokens() {
        assert_eq!(binary_operator("//"), Some(Operator::FloorDiv));
        assert_eq!(binary_operator("<<"), Some(Operator::LShift));
        assert_eq!(binary_operator("and"), None);
    }

    #[test]
    fn simple_assignment() {
        let module = read_python("x = 42").unwrap();
        assert_eq!(
            module.body,
            vec![Stmt::assign(Expr::name("x"), Expr::int(42))]
        );
    }

    #[test]
    fn syntax_error_reports_line() {
        let err = read_python("x = 1\ndef (:\n").unwrap_err();
        assert!(matches!(err, ReadError::Parse(_)));
    }
}
