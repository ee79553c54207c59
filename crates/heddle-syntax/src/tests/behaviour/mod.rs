//! Step definitions for the `heddle_syntax.feature` scenarios.

mod scenarios;

use std::cell::RefCell;
use std::collections::BTreeMap;

use rstest::fixture;
use rstest_bdd_macros::{given, then, when};

use crate::{
    ParseResult, Parser, RewriteResult, RewriteRule, Rewriter, SearchMatch, SupportedLanguage,
    Template,
};

type Captures = BTreeMap<String, String>;

/// What the steps of one scenario have set up or observed so far.
#[derive(Default)]
struct SyntaxWorld {
    language: Option<SupportedLanguage>,
    parsed: Option<ParseResult>,
    template: Option<Template>,
    replacement: Option<String>,
    matches: Vec<Captures>,
    rewritten: Option<RewriteResult>,
}

impl SyntaxWorld {
    fn language(&self) -> SupportedLanguage {
        self.language.expect("a language step runs first")
    }

    fn compile(&self, text: &str) -> Template {
        Template::compile(unquote(text), self.language()).expect("template compiles")
    }

    fn rewritten(&self) -> &RewriteResult {
        self.rewritten.as_ref().expect("a rewrite step ran")
    }
}

#[fixture]
fn world() -> RefCell<SyntaxWorld> {
    RefCell::new(SyntaxWorld::default())
}

/// Step arguments arrive with their surrounding quotes.
fn unquote(text: &str) -> &str {
    text.trim_matches('"')
}

fn capture_texts(found: &SearchMatch<'_>) -> Captures {
    found
        .captures()
        .iter()
        .map(|(name, value)| (name.clone(), value.text().to_owned()))
        .collect()
}

#[given("language {language}")]
fn given_language(world: &RefCell<SyntaxWorld>, language: String) {
    let parsed = unquote(&language).parse().expect("known language");
    world.borrow_mut().language = Some(parsed);
}

#[given("source code {code}")]
fn given_source(world: &RefCell<SyntaxWorld>, code: String) {
    let mut state = world.borrow_mut();
    let mut parser = Parser::new(state.language()).expect("grammar loads");
    state.parsed = Some(parser.parse(unquote(&code)).expect("tree produced"));
}

#[given("a template {template}")]
fn given_template(world: &RefCell<SyntaxWorld>, template: String) {
    let mut state = world.borrow_mut();
    state.template = Some(state.compile(&template));
}

#[given("a rewrite rule from {from_template} to {to_replacement}")]
fn given_rewrite_rule(world: &RefCell<SyntaxWorld>, from_template: String, to_replacement: String) {
    let mut state = world.borrow_mut();
    state.template = Some(state.compile(&from_template));
    state.replacement = Some(unquote(&to_replacement).to_owned());
}

#[when("the template is matched against the source")]
fn when_matched(world: &RefCell<SyntaxWorld>) {
    let mut state = world.borrow_mut();
    let found = {
        let parsed = state.parsed.as_ref().expect("a source step ran");
        let template = state.template.as_ref().expect("a template step ran");
        template.find_all(parsed).iter().map(capture_texts).collect()
    };
    state.matches = found;
}

#[when("the rewrite is applied")]
fn when_rewritten(world: &RefCell<SyntaxWorld>) {
    let mut state = world.borrow_mut();
    let source = state
        .parsed
        .as_ref()
        .map(|parsed| parsed.source().to_owned())
        .expect("a source step ran");
    let template = state.template.take().expect("a rewrite rule step ran");
    let replacement = state.replacement.take().expect("a rewrite rule step ran");

    let rule = RewriteRule::new(template, replacement).expect("replacement is valid");
    let result = Rewriter::new(state.language())
        .apply(&rule, &source)
        .expect("rewrite succeeds");
    state.rewritten = Some(result);
}

#[then("the match count is {count}")]
fn then_match_count(world: &RefCell<SyntaxWorld>, count: usize) {
    let state = world.borrow();
    assert_eq!(state.matches.len(), count, "matches: {:?}", state.matches);
}

#[then("no matches are found")]
fn then_no_matches(world: &RefCell<SyntaxWorld>) {
    let state = world.borrow();
    assert!(state.matches.is_empty(), "matches: {:?}", state.matches);
}

#[then("the capture {name} contains {expected}")]
fn then_capture_contains(world: &RefCell<SyntaxWorld>, name: String, expected: String) {
    let state = world.borrow();
    let (name, expected) = (unquote(&name), unquote(&expected));
    let seen = state
        .matches
        .iter()
        .filter_map(|captures| captures.get(name))
        .any(|text| text.contains(expected));
    assert!(seen, "no {name} capture containing {expected:?}: {:?}", state.matches);
}

#[then("the output is {text}")]
fn then_output_is(world: &RefCell<SyntaxWorld>, text: String) {
    assert_eq!(world.borrow().rewritten().output(), unquote(&text));
}

#[then("the rewrite made changes")]
fn then_rewrite_changed(world: &RefCell<SyntaxWorld>) {
    assert!(world.borrow().rewritten().has_changes());
}

#[then("the rewrite made no changes")]
fn then_rewrite_unchanged(world: &RefCell<SyntaxWorld>) {
    assert!(!world.borrow().rewritten().has_changes());
}
