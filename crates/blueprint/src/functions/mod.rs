//! The built-in function library.
//!
//! Functions are addressed as `NAMESPACE.method` (case-insensitive) and
//! resolved through a static catalog to a [`FunctionId`]. Time, randomness
//! and identity come from injected [capabilities](capabilities) so renders
//! can be made deterministic.

mod args;
pub mod capabilities;
mod date;
mod format;
mod math;
mod random;
mod string;
mod user;

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use bon::Builder;
use indexmap::IndexMap;
use tracing::trace;

use self::args::Call;
use self::capabilities::{Clock, EnvIdentity, Entropy, Identity, SystemClock, ThreadEntropy};
use crate::interpreter::{EvalError, compute_suggestions};
use crate::types::Value;

/// Function namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Date,
    Math,
    String,
    Format,
    Random,
    User,
}

impl Namespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Date => "DATE",
            Namespace::Math => "MATH",
            Namespace::String => "STRING",
            Namespace::Format => "FORMAT",
            Namespace::Random => "RANDOM",
            Namespace::User => "USER",
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Every built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionId {
    DateNow,
    DateYear,
    DateMonth,
    DateDay,
    DateFormat,
    MathRound,
    MathSum,
    MathAvg,
    MathPercentage,
    MathMin,
    MathMax,
    StringUpper,
    StringLower,
    StringCapitalize,
    StringReplace,
    StringTrim,
    StringLength,
    FormatCurrency,
    FormatNumber,
    FormatPhone,
    FormatPercent,
    RandomNumber,
    RandomUuid,
    RandomString,
    UserName,
    UserEmail,
    UserDate,
}

/// How many arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    /// `None` for variadic functions.
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn accepts(self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.max {
            Some(max) if max == self.min => write!(f, "{max}"),
            Some(max) => write!(f, "{} to {max}", self.min),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpec {
    /// Canonical qualified name, e.g. `MATH.round`.
    pub name: &'static str,
    pub namespace: Namespace,
    pub id: FunctionId,
    pub arity: Arity,
    /// Argument list as documented, e.g. `(value, [decimals])`.
    pub signature: &'static str,
    pub summary: &'static str,
}

const fn entry(
    name: &'static str,
    namespace: Namespace,
    id: FunctionId,
    arity: Arity,
    signature: &'static str,
    summary: &'static str,
) -> FunctionSpec {
    FunctionSpec {
        name,
        namespace,
        id,
        arity,
        signature,
        summary,
    }
}

/// All built-in functions in listing order.
pub static CATALOG: [FunctionSpec; 27] = [
    entry("DATE.now", Namespace::Date, FunctionId::DateNow, Arity::exactly(0), "()", "current date and time, YYYY-MM-DD HH:MM:SS"),
    entry("DATE.year", Namespace::Date, FunctionId::DateYear, Arity::exactly(0), "()", "current year"),
    entry("DATE.month", Namespace::Date, FunctionId::DateMonth, Arity::exactly(0), "()", "current month, 1 to 12"),
    entry("DATE.day", Namespace::Date, FunctionId::DateDay, Arity::exactly(0), "()", "current day of the month"),
    entry("DATE.format", Namespace::Date, FunctionId::DateFormat, Arity::exactly(1), "(pattern)", "current date with YYYY MM DD HH mm ss substituted"),
    entry("MATH.round", Namespace::Math, FunctionId::MathRound, Arity::between(1, 2), "(value, [decimals])", "round half to even"),
    entry("MATH.sum", Namespace::Math, FunctionId::MathSum, Arity::at_least(0), "(values...)", "sum of the arguments"),
    entry("MATH.avg", Namespace::Math, FunctionId::MathAvg, Arity::at_least(0), "(values...)", "mean of the arguments"),
    entry("MATH.percentage", Namespace::Math, FunctionId::MathPercentage, Arity::exactly(2), "(value, total)", "value as a percentage of total"),
    entry("MATH.min", Namespace::Math, FunctionId::MathMin, Arity::at_least(1), "(values...)", "smallest argument"),
    entry("MATH.max", Namespace::Math, FunctionId::MathMax, Arity::at_least(1), "(values...)", "largest argument"),
    entry("STRING.upper", Namespace::String, FunctionId::StringUpper, Arity::exactly(1), "(text)", "upper case"),
    entry("STRING.lower", Namespace::String, FunctionId::StringLower, Arity::exactly(1), "(text)", "lower case"),
    entry("STRING.capitalize", Namespace::String, FunctionId::StringCapitalize, Arity::exactly(1), "(text)", "first letter upper case, the rest lower case"),
    entry("STRING.replace", Namespace::String, FunctionId::StringReplace, Arity::exactly(3), "(text, find, replacement)", "replace every occurrence"),
    entry("STRING.trim", Namespace::String, FunctionId::StringTrim, Arity::exactly(1), "(text)", "strip surrounding whitespace"),
    entry("STRING.length", Namespace::String, FunctionId::StringLength, Arity::exactly(1), "(text)", "number of characters"),
    entry("FORMAT.currency", Namespace::Format, FunctionId::FormatCurrency, Arity::between(1, 2), "(amount, [symbol])", "money with two decimals, e.g. $1,000.00"),
    entry("FORMAT.number", Namespace::Format, FunctionId::FormatNumber, Arity::between(1, 2), "(value, [decimals])", "thousands separators, e.g. 1,234.50"),
    entry("FORMAT.phone", Namespace::Format, FunctionId::FormatPhone, Arity::exactly(1), "(number)", "(555) 123-4567 for ten digits"),
    entry("FORMAT.percent", Namespace::Format, FunctionId::FormatPercent, Arity::exactly(1), "(value)", "fraction as a percentage, e.g. 12.5%"),
    entry("RANDOM.number", Namespace::Random, FunctionId::RandomNumber, Arity::exactly(2), "(min, max)", "integer between min and max inclusive"),
    entry("RANDOM.uuid", Namespace::Random, FunctionId::RandomUuid, Arity::exactly(0), "()", "random v4 UUID"),
    entry("RANDOM.string", Namespace::Random, FunctionId::RandomString, Arity::exactly(1), "(length)", "random letters and digits"),
    entry("USER.name", Namespace::User, FunctionId::UserName, Arity::exactly(0), "()", "user name"),
    entry("USER.email", Namespace::User, FunctionId::UserEmail, Arity::exactly(0), "()", "user email"),
    entry("USER.date", Namespace::User, FunctionId::UserDate, Arity::exactly(0), "()", "same as DATE.now"),
];

/// Extra names accepted by [`lookup`].
const ALIASES: [(&str, FunctionId); 1] = [("MATH.average", FunctionId::MathAvg)];

/// Find a function by qualified name, ignoring case.
pub fn lookup(name: &str) -> Option<&'static FunctionSpec> {
    let name = name.trim();
    CATALOG
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
        .or_else(|| {
            let (_, id) = ALIASES
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(name))?;
            CATALOG.iter().find(|spec| spec.id == *id)
        })
}

/// Executes built-in functions.
///
/// # Example
///
/// ```
/// use blueprint::{FunctionLibrary, Value};
///
/// let functions = FunctionLibrary::new();
/// let result = functions.execute("STRING.upper", &["abc".into()]).unwrap();
/// assert_eq!(result, Value::from("ABC"));
/// ```
#[derive(Clone, Builder)]
pub struct FunctionLibrary {
    #[builder(default = system_clock())]
    clock: Arc<dyn Clock>,

    #[builder(default = thread_entropy())]
    entropy: Arc<dyn Entropy>,

    #[builder(default = env_identity())]
    identity: Arc<dyn Identity>,
}

fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

fn thread_entropy() -> Arc<dyn Entropy> {
    Arc::new(ThreadEntropy)
}

fn env_identity() -> Arc<dyn Identity> {
    Arc::new(EnvIdentity)
}

impl FunctionLibrary {
    /// A library reading the system clock, thread RNG and environment.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Call a function with already evaluated arguments.
    pub fn execute(&self, name: &str, args: &[Value]) -> Result<Value, EvalError> {
        self.execute_with_user(name, args, None)
    }

    /// Call a function, letting a `user` profile map override the
    /// identity for `USER.name` and `USER.email`.
    pub fn execute_with_user(
        &self,
        name: &str,
        args: &[Value],
        profile: Option<&IndexMap<String, Value>>,
    ) -> Result<Value, EvalError> {
        let spec = lookup(name).ok_or_else(|| EvalError::FunctionNotFound {
            name: name.to_string(),
            suggestions: compute_suggestions(name, self.available_functions()),
        })?;
        if !spec.arity.accepts(args.len()) {
            return Err(EvalError::ArgumentCount {
                function: spec.name,
                expected: spec.arity,
                got: args.len(),
            });
        }
        trace!(function = spec.name, args = args.len(), "calling function");

        let call = Call {
            function: spec.name,
            args,
        };
        let clock = self.clock.as_ref();
        let entropy = self.entropy.as_ref();
        let identity = self.identity.as_ref();
        match spec.id {
            FunctionId::DateNow | FunctionId::UserDate => Ok(date::now(clock)),
            FunctionId::DateYear => Ok(date::year(clock)),
            FunctionId::DateMonth => Ok(date::month(clock)),
            FunctionId::DateDay => Ok(date::day(clock)),
            FunctionId::DateFormat => date::format(clock, call),
            FunctionId::MathRound => math::round(call),
            FunctionId::MathSum => math::sum(call),
            FunctionId::MathAvg => math::avg(call),
            FunctionId::MathPercentage => math::percentage(call),
            FunctionId::MathMin => math::min(call),
            FunctionId::MathMax => math::max(call),
            FunctionId::StringUpper => string::upper(call),
            FunctionId::StringLower => string::lower(call),
            FunctionId::StringCapitalize => string::capitalize(call),
            FunctionId::StringReplace => string::replace(call),
            FunctionId::StringTrim => string::trim(call),
            FunctionId::StringLength => string::length(call),
            FunctionId::FormatCurrency => format::currency(call),
            FunctionId::FormatNumber => format::number(call),
            FunctionId::FormatPhone => format::phone(call),
            FunctionId::FormatPercent => format::percent(call),
            FunctionId::RandomNumber => random::number(entropy, call),
            FunctionId::RandomUuid => Ok(random::uuid(entropy)),
            FunctionId::RandomString => random::string(entropy, call),
            FunctionId::UserName => Ok(user::name(identity, profile)),
            FunctionId::UserEmail => Ok(user::email(identity, profile)),
        }
    }

    /// Qualified names of every function, in catalog order.
    pub fn available_functions(&self) -> impl Iterator<Item = &'static str> {
        CATALOG.iter().map(|spec| spec.name)
    }
}

impl Default for FunctionLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for FunctionLibrary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FunctionLibrary").finish_non_exhaustive()
    }
}
