//! Pick one handler set up front and compose it.
//!
//! The functions take typed pairs and an explicit optional default. The
//! [`select_if!`](crate::select_if!) and [`select_switch!`](crate::select_switch!)
//! macros take a flat argument list instead and decide whether a trailing
//! default is present by counting arguments.

use crate::engine::Chain;

/// First branch whose condition is `true`, else `default`, else a
/// pass-through. Conditions are plain values, evaluated by the caller; only
/// their order decides precedence.
pub fn select_if<A, B, I, H>(branches: I, default: Option<Chain<A, B>>) -> Chain<A, B>
where
    I: IntoIterator<Item = (bool, H)>,
    H: Into<Chain<A, B>>,
{
    branches
        .into_iter()
        .find(|(condition, _)| *condition)
        .map(|(_, handlers)| handlers.into())
        .or(default)
        .unwrap_or_default()
}

/// First case whose candidate equals `probe`, else `default`, else a
/// pass-through.
pub fn select_switch<A, B, T, I, H>(probe: &T, cases: I, default: Option<Chain<A, B>>) -> Chain<A, B>
where
    T: PartialEq,
    I: IntoIterator<Item = (T, H)>,
    H: Into<Chain<A, B>>,
{
    cases
        .into_iter()
        .find(|(candidate, _)| candidate == probe)
        .map(|(_, handlers)| handlers.into())
        .or(default)
        .unwrap_or_default()
}

#[doc(hidden)]
pub fn __select_if<A, B>(branches: Vec<(bool, Chain<A, B>)>, default: Option<Chain<A, B>>) -> Chain<A, B> {
    select_if(branches, default)
}

#[doc(hidden)]
pub fn __select_switch<A, B, T: PartialEq>(
    probe: &T,
    cases: Vec<(T, Chain<A, B>)>,
    default: Option<Chain<A, B>>,
) -> Chain<A, B> {
    select_switch(probe, cases, default)
}

/// `select_if!(cond1, handlers1, cond2, handlers2, ..., [default])`
///
/// An odd argument count means the last argument is the default; with an
/// even count a pass-through default is used. Each handler set is anything
/// convertible into a [`Chain`](crate::Chain): a `Handler`, a `Vec<Handler>`
/// or another chain.
#[macro_export]
macro_rules! select_if {
    (@pairs [$($pairs:tt)*]) => {{
        let branches = ::std::vec![$($pairs)*];
        $crate::select::__select_if(branches, ::std::option::Option::None)
    }};
    (@pairs [$($pairs:tt)*] $cond:expr, $handlers:expr $(,)?) => {
        $crate::select_if!(@pairs [$($pairs)* ($cond, $crate::Chain::from($handlers)),])
    };
    (@pairs [$($pairs:tt)*] $cond:expr, $handlers:expr, $($rest:tt)+) => {
        $crate::select_if!(@pairs [$($pairs)* ($cond, $crate::Chain::from($handlers)),] $($rest)+)
    };
    (@pairs [$($pairs:tt)*] $default:expr $(,)?) => {{
        let branches = ::std::vec![$($pairs)*];
        $crate::select::__select_if(
            branches,
            ::std::option::Option::Some($crate::Chain::from($default)),
        )
    }};
    (@pairs $($malformed:tt)*) => {
        ::std::compile_error!("select_if! expects `condition, handlers` pairs and an optional default")
    };
    ($($args:tt)*) => {
        $crate::select_if!(@pairs [] $($args)*)
    };
}

/// `select_switch!(probe, case1, handlers1, case2, handlers2, ..., [default])`
///
/// An even argument count (probe included) means the last argument is the
/// default; with an odd count a pass-through default is used. Candidates are
/// compared with `==` against the probe, so they must share its type.
#[macro_export]
macro_rules! select_switch {
    (@cases $probe:expr; [$($cases:tt)*]) => {{
        let probe = $probe;
        let cases = ::std::vec![$($cases)*];
        $crate::select::__select_switch(&probe, cases, ::std::option::Option::None)
    }};
    (@cases $probe:expr; [$($cases:tt)*] $case:expr, $handlers:expr $(,)?) => {
        $crate::select_switch!(@cases $probe; [$($cases)* ($case, $crate::Chain::from($handlers)),])
    };
    (@cases $probe:expr; [$($cases:tt)*] $case:expr, $handlers:expr, $($rest:tt)+) => {
        $crate::select_switch!(@cases $probe; [$($cases)* ($case, $crate::Chain::from($handlers)),] $($rest)+)
    };
    (@cases $probe:expr; [$($cases:tt)*] $default:expr $(,)?) => {{
        let probe = $probe;
        let cases = ::std::vec![$($cases)*];
        $crate::select::__select_switch(
            &probe,
            cases,
            ::std::option::Option::Some($crate::Chain::from($default)),
        )
    }};
    (@cases $($malformed:tt)*) => {
        ::std::compile_error!("select_switch! expects a probe, `case, handlers` pairs and an optional default")
    };
    ($probe:expr $(, $($args:tt)*)?) => {
        $crate::select_switch!(@cases $probe; [] $($($args)*)?)
    };
}
