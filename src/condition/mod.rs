//! 标签条件表达式
//!
//! 限定变量（如 `i1:Vegetable&!Frozen`）使用的布尔表达式：
//! - `&`: 逻辑与（n 元）
//! - `|`: 逻辑或（n 元）
//! - `!`: 逻辑非
//! - `(...)`: 分组
//!
//! 语法中不允许空白。同一层级不能混用 `&` 与 `|`，需要用括号分组：
//! ```text
//! Grain&!(Wheat|Rye)
//! ```
//!
//! 解析结果保留括号结构，`Display` 可以逐字节还原原始文本。

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{RewriteError, RewriteResult};

/// 条件表达式语法树
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// 原子标签
    Tag(String),

    /// 逻辑非 `!A`
    Not(Box<Condition>),

    /// 逻辑与 `A&B&...`
    All(Vec<Condition>),

    /// 逻辑或 `A|B|...`
    Any(Vec<Condition>),

    /// 括号分组 `(A)`
    Group(Box<Condition>),
}

impl Condition {
    /// 解析条件字符串
    pub fn parse(source: &str) -> RewriteResult<Condition> {
        let mut parser = ConditionParser::new(source);
        let condition = parser.parse_expr()?;
        match parser.chars.peek().copied() {
            None => Ok(condition),
            Some((_, ')')) => Err(parser.error("unbalanced ')'")),
            Some((_, c)) => Err(parser.error(format!("unexpected '{}'", c))),
        }
    }

    /// 创建原子标签
    pub fn tag(name: impl Into<String>) -> Self {
        Condition::Tag(name.into())
    }

    /// 按真值赋值求值，未出现的符号视为 false
    pub fn evaluate(
        &self,
        truth: &HashMap<String, bool>,
    ) -> bool {
        self.evaluate_with(&|symbol: &str| truth.get(symbol).copied().unwrap_or(false))
    }

    /// 使用查询函数求值（短路）
    pub fn evaluate_with<F>(
        &self,
        truth: &F,
    ) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match self {
            Condition::Tag(name) => truth(name.as_str()),
            Condition::Not(inner) => !inner.evaluate_with(truth),
            Condition::All(operands) => operands.iter().all(|c| c.evaluate_with(truth)),
            Condition::Any(operands) => operands.iter().any(|c| c.evaluate_with(truth)),
            Condition::Group(inner) => inner.evaluate_with(truth),
        }
    }

    /// 标签集合是否满足条件
    pub fn satisfied_by(
        &self,
        tags: &HashSet<String>,
    ) -> bool {
        self.evaluate_with(&|symbol: &str| tags.contains(symbol))
    }

    /// 表达式引用的所有原子标签
    pub fn symbols(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols<'a>(
        &'a self,
        out: &mut BTreeSet<&'a str>,
    ) {
        match self {
            Condition::Tag(name) => {
                out.insert(name.as_str());
            }
            Condition::Not(inner) | Condition::Group(inner) => inner.collect_symbols(out),
            Condition::All(operands) | Condition::Any(operands) => {
                for operand in operands {
                    operand.collect_symbols(out);
                }
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Condition::Tag(name) => write!(f, "{}", name),
            Condition::Not(inner) => write!(f, "!{}", inner),
            Condition::Group(inner) => write!(f, "({})", inner),
            Condition::All(operands) => write_joined(f, operands, '&'),
            Condition::Any(operands) => write_joined(f, operands, '|'),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    operands: &[Condition],
    sep: char,
) -> fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", operand)?;
    }
    Ok(())
}

impl std::str::FromStr for Condition {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::parse(s)
    }
}

fn is_special(c: char) -> bool {
    matches!(c, '&' | '|' | '!' | '(' | ')' | ':')
}

/// 递归下降解析器
///
/// ```text
/// expr    := operand ('&' operand)* | operand ('|' operand)*
/// operand := '!' operand | '(' expr ')' | tag
/// ```
struct ConditionParser<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> ConditionParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn error(
        &self,
        reason: impl Into<String>,
    ) -> RewriteError {
        RewriteError::InvalidCondition {
            condition: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn parse_expr(&mut self) -> RewriteResult<Condition> {
        let first = self.parse_operand()?;
        let op = match self.chars.peek().copied() {
            Some((_, c)) if c == '&' || c == '|' => c,
            _ => return Ok(first),
        };

        let mut operands = vec![first];
        while let Some((_, c)) = self.chars.peek().copied() {
            if c != '&' && c != '|' {
                break;
            }
            if c != op {
                return Err(self.error("'&' and '|' cannot be mixed without parentheses"));
            }
            self.chars.next();
            operands.push(self.parse_operand()?);
        }

        Ok(if op == '&' {
            Condition::All(operands)
        } else {
            Condition::Any(operands)
        })
    }

    fn parse_operand(&mut self) -> RewriteResult<Condition> {
        match self.chars.peek().copied() {
            None => Err(self.error("unexpected end of condition")),
            Some((_, '!')) => {
                self.chars.next();
                Ok(Condition::Not(Box::new(self.parse_operand()?)))
            }
            Some((_, '(')) => {
                self.chars.next();
                let inner = self.parse_expr()?;
                match self.chars.next() {
                    Some((_, ')')) => Ok(Condition::Group(Box::new(inner))),
                    _ => Err(self.error("missing ')'")),
                }
            }
            Some((_, c)) if is_special(c) => Err(self.error(format!("expected a tag before '{}'", c))),
            Some((start, _)) => {
                let mut end = start;
                while let Some((i, c)) = self.chars.peek().copied() {
                    if is_special(c) {
                        break;
                    }
                    if c.is_whitespace() {
                        return Err(self.error("whitespace is not allowed"));
                    }
                    end = i + c.len_utf8();
                    self.chars.next();
                }
                Ok(Condition::Tag(self.source[start..end].to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests;
