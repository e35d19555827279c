use maud::{html, Markup};
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    models::{ClassicResult, Letter, TraitResult},
    names,
    summary::{self, Profile},
};

/// Which trait list the results page shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Strong,
    Weak,
}

impl Tab {
    fn as_str(self) -> &'static str {
        match self {
            Tab::Strong => "strong",
            Tab::Weak => "weak",
        }
    }
}

pub fn results(
    full_name: &str,
    classic: Option<&ClassicResult>,
    traits: Option<&TraitResult>,
    tab: Tab,
    locale: &str,
) -> Markup {
    html! {
        h1 { (t!("done.title", locale = locale)) }
        p { (t!("done.greeting", locale = locale, name = full_name)) }

        article {
            header { strong { (t!("done.classic_title", locale = locale)) } }
            @match classic {
                Some(result) => {
                    (classic_summary(result, locale))
                }
                None => {
                    p."secondary" { (t!("done.classic_missing", locale = locale)) }
                }
            }
        }

        article {
            (trait_tabs(full_name, traits, tab, locale))
        }
    }
}

fn classic_summary(result: &ClassicResult, locale: &str) -> Markup {
    let profile = Profile::of(summary::dominant(result));

    html! {
        p { strong { (t!(profile.label_key(), locale = locale)) } }
        div.pie role="img" style=(format!("background: {};", summary::pie_gradient(result))) {}
        ul.legend {
            @for letter in Letter::ALL {
                li {
                    span.swatch style=(format!("background: {};", summary::SLICE_COLORS[letter.index()])) {}
                    (letter) ": " (result.get(letter)) "%"
                }
            }
        }
    }
}

fn trait_tabs(full_name: &str, traits: Option<&TraitResult>, tab: Tab, locale: &str) -> Markup {
    let (items, empty_key) = match tab {
        Tab::Strong => (traits.map(|t| t.strong.as_slice()), "done.no_strong"),
        Tab::Weak => (traits.map(|t| t.weak.as_slice()), "done.no_weak"),
    };
    let items = items.unwrap_or_default();

    html! {
        nav.tabs {
            @for (candidate, label_key) in [(Tab::Strong, "done.strong_tab"), (Tab::Weak, "done.weak_tab")] {
                a href=(names::results_tab_url(full_name, candidate.as_str()))
                  class=[(candidate == tab).then_some("active")] {
                    (t!(label_key, locale = locale))
                }
            }
        }
        @if items.is_empty() {
            p."secondary" { (t!(empty_key, locale = locale)) }
        } @else {
            ul {
                @for item in items {
                    li { (item) }
                }
            }
        }
    }
}
