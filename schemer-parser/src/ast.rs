// schemer-parser - Lexer and parser for the Schemer programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! AST node model.
//!
//! Nodes form a single sum type rather than a trait-object hierarchy; the
//! debug formatter is a match over the variants. `debug_string` output is
//! deterministic and is what the parser tests compare against.

use std::fmt;

/// Discriminator for AST node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    If,
    Def,
    Lambda,
    Ident,
    IntLit,
    FloatLit,
    StringLit,
    BoolLit,
}

/// An expression tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Ordered top-level expressions.
    Program(Vec<AstNode>),
    Add(Box<AstNode>, Box<AstNode>),
    Sub(Box<AstNode>, Box<AstNode>),
    Mul(Box<AstNode>, Box<AstNode>),
    Div(Box<AstNode>, Box<AstNode>),
    Lt(Box<AstNode>, Box<AstNode>),
    Lte(Box<AstNode>, Box<AstNode>),
    Gt(Box<AstNode>, Box<AstNode>),
    Gte(Box<AstNode>, Box<AstNode>),
    Eq(Box<AstNode>, Box<AstNode>),
    If {
        cond: Box<AstNode>,
        then_branch: Box<AstNode>,
        else_branch: Box<AstNode>,
    },
    Def {
        name: String,
        value: Box<AstNode>,
    },
    Lambda {
        params: Vec<String>,
        body: Box<AstNode>,
    },
    Ident(String),
    IntLit(i64),
    FloatLit(f64),
    StringLit(String),
    BoolLit(bool),
}

impl AstNode {
    /// The node's discriminator.
    pub fn kind(&self) -> NodeKind {
        match self {
            AstNode::Program(_) => NodeKind::Program,
            AstNode::Add(..) => NodeKind::Add,
            AstNode::Sub(..) => NodeKind::Sub,
            AstNode::Mul(..) => NodeKind::Mul,
            AstNode::Div(..) => NodeKind::Div,
            AstNode::Lt(..) => NodeKind::Lt,
            AstNode::Lte(..) => NodeKind::Lte,
            AstNode::Gt(..) => NodeKind::Gt,
            AstNode::Gte(..) => NodeKind::Gte,
            AstNode::Eq(..) => NodeKind::Eq,
            AstNode::If { .. } => NodeKind::If,
            AstNode::Def { .. } => NodeKind::Def,
            AstNode::Lambda { .. } => NodeKind::Lambda,
            AstNode::Ident(_) => NodeKind::Ident,
            AstNode::IntLit(_) => NodeKind::IntLit,
            AstNode::FloatLit(_) => NodeKind::FloatLit,
            AstNode::StringLit(_) => NodeKind::StringLit,
            AstNode::BoolLit(_) => NodeKind::BoolLit,
        }
    }

    /// Child nodes as an ordered view. Leaves return an empty vector.
    pub fn children(&self) -> Vec<&AstNode> {
        match self {
            AstNode::Program(nodes) => nodes.iter().collect(),
            AstNode::Add(lhs, rhs)
            | AstNode::Sub(lhs, rhs)
            | AstNode::Mul(lhs, rhs)
            | AstNode::Div(lhs, rhs)
            | AstNode::Lt(lhs, rhs)
            | AstNode::Lte(lhs, rhs)
            | AstNode::Gt(lhs, rhs)
            | AstNode::Gte(lhs, rhs)
            | AstNode::Eq(lhs, rhs) => vec![&**lhs, &**rhs],
            AstNode::If {
                cond,
                then_branch,
                else_branch,
            } => vec![&**cond, &**then_branch, &**else_branch],
            AstNode::Def { value, .. } => vec![&**value],
            AstNode::Lambda { body, .. } => vec![&**body],
            AstNode::Ident(_)
            | AstNode::IntLit(_)
            | AstNode::FloatLit(_)
            | AstNode::StringLit(_)
            | AstNode::BoolLit(_) => Vec::new(),
        }
    }

    /// Deterministic debug representation.
    pub fn debug_string(&self) -> String {
        self.to_string()
    }
}

fn binary(f: &mut fmt::Formatter<'_>, name: &str, lhs: &AstNode, rhs: &AstNode) -> fmt::Result {
    write!(f, "{}({}, {})", name, lhs, rhs)
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Program(nodes) => {
                let mut first = true;
                for node in nodes {
                    if !first {
                        writeln!(f)?;
                    }
                    write!(f, "{}", node)?;
                    first = false;
                }
                Ok(())
            }
            AstNode::Add(lhs, rhs) => binary(f, "AddExp", lhs, rhs),
            AstNode::Sub(lhs, rhs) => binary(f, "SubExp", lhs, rhs),
            AstNode::Mul(lhs, rhs) => binary(f, "MulExp", lhs, rhs),
            AstNode::Div(lhs, rhs) => binary(f, "DivExp", lhs, rhs),
            AstNode::Lt(lhs, rhs) => binary(f, "LtExp", lhs, rhs),
            AstNode::Lte(lhs, rhs) => binary(f, "LteExp", lhs, rhs),
            AstNode::Gt(lhs, rhs) => binary(f, "GtExp", lhs, rhs),
            AstNode::Gte(lhs, rhs) => binary(f, "GteExp", lhs, rhs),
            AstNode::Eq(lhs, rhs) => binary(f, "EqExp", lhs, rhs),
            AstNode::If {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "IfExp({}, {}, {})", cond, then_branch, else_branch),
            AstNode::Def { name, value } => write!(f, "DefExp({}, {})", name, value),
            AstNode::Lambda { params, body } => {
                write!(f, "LambdaExp({}, {})", params.join(" "), body)
            }
            AstNode::Ident(name) => write!(f, "{}", name),
            AstNode::IntLit(value) => write!(f, "{}", value),
            AstNode::FloatLit(value) => write!(f, "{}", value),
            AstNode::StringLit(value) => write!(f, "\"{}\"", value),
            AstNode::BoolLit(value) => write!(f, "{}", value),
        }
    }
}
