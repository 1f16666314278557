//! Search clauses and their boolean composition
//!
//! A [`Clause`] is a single predicate on dimension item values. Clauses are
//! composed into [`Conjunction`]s, and members of a conjunction may be wrapped
//! in a parenthesized group with [`Criterion::group`].
//!
//! Rendering is positional: the first member of a conjunction carries no
//! connective, every following member is prefixed with the conjunction's own
//! keyword, and a group is always opened with the keyword. The tree is rendered
//! exactly as nested by the caller; logically equivalent trees may produce
//! different (but valid) clause strings.
//!
//! ```
//! use rsuite_query::{Clause, Conjunction, Criterion};
//!
//! let pair = Conjunction::and([
//!     Clause::begins_with("'ping'"),
//!     Clause::begins_with("'pong'"),
//! ]);
//! let search = Conjunction::or([
//!     Criterion::from(Clause::contains("'ball'")),
//!     Criterion::group([pair]),
//! ]);
//!
//! assert_eq!(
//!     search.compile().unwrap(),
//!     "CONTAINS 'ball' OR ( BEGINS-WITH 'ping' AND BEGINS-WITH 'pong' )"
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{QueryError, Result};

/// Search operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Exact match
    Match,
    /// Contains substring
    Contains,
    /// Starts with
    BeginsWith,
    /// Ends with
    EndsWith,
}

impl Operator {
    /// Keyword used in the clause grammar
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Match => "MATCH",
            Self::Contains => "CONTAINS",
            Self::BeginsWith => "BEGINS-WITH",
            Self::EndsWith => "ENDS-WITH",
        }
    }

    /// Parse operator from string
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "match" | "eq" => Ok(Self::Match),
            "contains" => Ok(Self::Contains),
            "begins_with" | "begins-with" | "starts_with" => Ok(Self::BeginsWith),
            "ends_with" | "ends-with" => Ok(Self::EndsWith),
            _ => Err(QueryError::invalid_argument(format!(
                "unknown search operator: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Boolean connectives joining the members of a conjunction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
    Not,
}

impl Connective {
    /// Keyword used in the clause grammar
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A single search predicate: operator plus operand
///
/// The operand is rendered verbatim, so quoting is up to the caller
/// (`"'home'"` renders as `CONTAINS 'home'`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    operator: Operator,
    operand: String,
}

impl Clause {
    /// Create a clause
    pub fn new(operator: Operator, operand: impl Into<String>) -> Self {
        Self {
            operator,
            operand: operand.into(),
        }
    }

    /// Create an exact-match clause
    pub fn matches(operand: impl Into<String>) -> Self {
        Self::new(Operator::Match, operand)
    }

    /// Create a contains clause
    pub fn contains(operand: impl Into<String>) -> Self {
        Self::new(Operator::Contains, operand)
    }

    /// Create a begins-with clause
    pub fn begins_with(operand: impl Into<String>) -> Self {
        Self::new(Operator::BeginsWith, operand)
    }

    /// Create an ends-with clause
    pub fn ends_with(operand: impl Into<String>) -> Self {
        Self::new(Operator::EndsWith, operand)
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> &str {
        &self.operand
    }

    /// Render as `<KEYWORD> <operand>`
    pub fn compile(&self) -> String {
        format!("{} {}", self.operator.keyword(), self.operand)
    }
}

/// Parses `<operator>:<operand>`, e.g. `contains:'red'`
impl FromStr for Clause {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        let (operator, operand) = s.split_once(':').ok_or_else(|| {
            QueryError::invalid_argument(format!(
                "search clause must look like <operator>:<operand>, got: {}",
                s
            ))
        })?;

        if operand.is_empty() {
            return Err(QueryError::invalid_argument(format!(
                "search clause has an empty operand: {}",
                s
            )));
        }

        Ok(Self::new(Operator::parse(operator)?, operand))
    }
}

/// A member of a conjunction or a top-level search criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Leaf predicate
    Clause(Clause),
    /// Nested conjunction, rendered without parentheses
    Conjunction(Conjunction),
    /// Parenthesized group of clauses and conjunctions
    Group(Vec<Criterion>),
}

impl Criterion {
    /// Wrap members in a parenthesized group
    ///
    /// Nested groups are flattened into this one.
    pub fn group<I, C>(members: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Criterion>,
    {
        let mut items = Vec::new();
        for member in members {
            match member.into() {
                Self::Group(inner) => items.extend(inner),
                other => items.push(other),
            }
        }
        Self::Group(items)
    }

    /// Render this criterion on its own
    ///
    /// A standalone group renders as ` ( <a><b>... )`, with its items
    /// concatenated as they compile.
    pub fn compile(&self) -> Result<String> {
        match self {
            Self::Clause(clause) => Ok(clause.compile()),
            Self::Conjunction(conjunction) => conjunction.compile(),
            Self::Group(_) => {
                let items = self.group_items()?;
                let mut out = String::from(" ( ");
                for item in items {
                    out.push_str(&item.compile()?);
                }
                out.push_str(" )");
                Ok(out)
            }
        }
    }

    /// Flattened items of a group, rejecting empty groups
    fn group_items(&self) -> Result<Vec<&Criterion>> {
        fn collect<'a>(members: &'a [Criterion], out: &mut Vec<&'a Criterion>) {
            for member in members {
                match member {
                    Criterion::Group(inner) => collect(inner, out),
                    other => out.push(other),
                }
            }
        }

        let mut items = Vec::new();
        if let Self::Group(members) = self {
            collect(members, &mut items);
        }

        if items.is_empty() {
            return Err(QueryError::configuration(
                "a search group needs at least one clause or conjunction",
            ));
        }
        Ok(items)
    }
}

impl From<Clause> for Criterion {
    fn from(clause: Clause) -> Self {
        Self::Clause(clause)
    }
}

impl From<Conjunction> for Criterion {
    fn from(conjunction: Conjunction) -> Self {
        Self::Conjunction(conjunction)
    }
}

/// Ordered members joined by one connective
///
/// Every member is rendered with this conjunction's keyword; composing never
/// alters the members themselves, so the same clause can be reused in several
/// conjunctions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conjunction {
    kind: Connective,
    members: Vec<Criterion>,
}

impl Conjunction {
    /// Compose members with the given connective
    pub fn new<I, C>(kind: Connective, members: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Criterion>,
    {
        Self {
            kind,
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Compose members with AND
    pub fn and<I, C>(members: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Criterion>,
    {
        Self::new(Connective::And, members)
    }

    /// Compose members with OR
    pub fn or<I, C>(members: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Criterion>,
    {
        Self::new(Connective::Or, members)
    }

    /// Compose members with NOT
    pub fn not<I, C>(members: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Criterion>,
    {
        Self::new(Connective::Not, members)
    }

    pub fn kind(&self) -> Connective {
        self.kind
    }

    pub fn members(&self) -> &[Criterion] {
        &self.members
    }

    /// Render members left to right
    pub fn compile(&self) -> Result<String> {
        if self.members.is_empty() {
            return Err(QueryError::configuration(format!(
                "{} conjunction needs at least one member",
                self.kind
            )));
        }

        let keyword = self.kind.keyword();
        let mut out = String::new();

        for (index, member) in self.members.iter().enumerate() {
            match member {
                Criterion::Group(_) => {
                    for (position, item) in member.group_items()?.into_iter().enumerate() {
                        if position == 0 {
                            out.push_str(&format!(" {} ( {}", keyword, item.compile()?));
                        } else {
                            out.push_str(&format!(" {} {}", keyword, item.compile()?));
                        }
                    }
                    out.push_str(" )");
                }
                _ if index == 0 => out.push_str(&member.compile()?),
                _ => out.push_str(&format!(" {} {}", keyword, member.compile()?)),
            }
        }

        Ok(out)
    }
}
