//! Condition and match selectors, through both the macros and the functions.

use anyhow::anyhow;
use handler_chain::{compose, select_if, select_switch, Chain, Handler};

#[derive(Debug, Default, PartialEq)]
struct Res {
    name: Vec<&'static str>,
    error: Vec<String>,
}

fn named(name: &'static str) -> Handler<(), Res> {
    Handler::normal_sync(move |_: &mut (), res: &mut Res| {
        res.name.push(name);
        Ok(())
    })
}

fn trap() -> Handler<(), Res> {
    Handler::trap_sync(|err, _: &mut (), res: &mut Res| {
        res.error.push(err.to_string());
        Ok(())
    })
}

async fn names(chain: Chain<(), Res>) -> Vec<&'static str> {
    let mut res = Res::default();
    chain.run(&mut (), &mut res).await.unwrap();
    res.name
}

// =========================================================================
// select_if!
// =========================================================================

#[tokio::test]
async fn if_false_uses_else() {
    let chain = handler_chain::select_if!(false, named("h1"), named("h2"));
    assert_eq!(names(chain).await, vec!["h2"]);
}

#[tokio::test]
async fn if_true_wins_over_later_branches() {
    let chain = handler_chain::select_if!(true, named("h1"), false, named("h2"), named("h3"));
    assert_eq!(names(chain).await, vec!["h1"]);

    // Overlapping conditions: order alone decides.
    let chain = handler_chain::select_if!(true, named("h1"), true, named("h2"));
    assert_eq!(names(chain).await, vec!["h1"]);
}

#[tokio::test]
async fn if_without_else_passes_through() {
    let chain = handler_chain::select_if!(false, named("h1"), false, named("h2"));
    assert!(chain.is_empty());

    let mut res = Res::default();
    chain.run(&mut (), &mut res).await.unwrap();
    assert_eq!(res, Res::default());
}

#[tokio::test]
async fn if_else_if_with_handler_lists() {
    let a = 2;
    let chain = handler_chain::select_if!(
        a == 1, vec![named("one"), named("one.b")],
        a == 2, vec![named("two"), named("two.b")],
        vec![named("else")],
    );
    assert_eq!(names(chain).await, vec!["two", "two.b"]);
}

#[tokio::test]
async fn if_with_only_a_default() {
    let chain = handler_chain::select_if!(named("only"));
    assert_eq!(names(chain).await, vec!["only"]);

    let chain: Chain<(), Res> = handler_chain::select_if!();
    assert!(chain.is_empty());
}

#[tokio::test]
async fn if_selected_chain_keeps_fault_traps() {
    let chain = handler_chain::select_if!(
        true,
        vec![
            Handler::normal_sync(|_: &mut (), _: &mut Res| Err(anyhow!("inside"))),
            named("skipped"),
            trap(),
            named("after"),
        ],
    );

    let mut res = Res::default();
    chain.run(&mut (), &mut res).await.unwrap();
    assert_eq!(res.name, vec!["after"]);
    assert_eq!(res.error, vec!["inside"]);
}

#[tokio::test]
async fn selector_nests_inside_a_chain() {
    let admin = false;
    let chain = compose([
        named("first"),
        handler_chain::select_if!(admin, named("admin"), named("guest")).into(),
        named("last"),
    ]);
    assert_eq!(names(chain).await, vec!["first", "guest", "last"]);
}

// =========================================================================
// select_switch!
// =========================================================================

#[tokio::test]
async fn switch_picks_matching_case() {
    let chain = handler_chain::select_switch!(2, 1, named("h1"), 2, named("h2"), named("default"));
    assert_eq!(names(chain).await, vec!["h2"]);
}

#[tokio::test]
async fn switch_without_match_uses_default() {
    let chain = handler_chain::select_switch!(7, 1, named("h1"), 2, named("h2"), named("default"));
    assert_eq!(names(chain).await, vec!["default"]);
}

#[tokio::test]
async fn switch_without_default_passes_through() {
    let chain = handler_chain::select_switch!(9, 1, named("h1"), 2, named("h2"));
    assert!(chain.is_empty());
    assert!(names(chain).await.is_empty());

    let chain: Chain<(), Res> = handler_chain::select_switch!(9);
    assert!(chain.is_empty());
}

#[tokio::test]
async fn switch_first_equal_case_wins() {
    let method = "POST";
    let chain = handler_chain::select_switch!(
        method,
        "GET", vec![named("get")],
        "POST", vec![named("post"), named("post.b")],
        "POST", vec![named("post.again")],
    );
    assert_eq!(names(chain).await, vec!["post", "post.b"]);
}

// =========================================================================
// Function forms
// =========================================================================

#[tokio::test]
async fn function_forms_take_explicit_default() {
    let chain = select_if(
        [(false, named("h1")), (false, named("h2"))],
        Some(named("else").into()),
    );
    assert_eq!(names(chain).await, vec!["else"]);

    let chain = select_switch(
        &'b',
        vec![('a', vec![named("a")]), ('b', vec![named("b")])],
        None,
    );
    assert_eq!(names(chain).await, vec!["b"]);
}
