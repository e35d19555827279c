use maud::{html, Markup};
use rust_i18n::t;

use crate::{
    models::{Letter, Pool},
    names,
    services::intake::PoolSizes,
};

/// Values kept in the intake form. Cleared after a successful save.
#[derive(Debug, Default, Clone)]
pub struct IntakeForm {
    pub question: String,
    pub raw_options: String,
    pub pool: Pool,
}

pub enum AdminMessage {
    None,
    Saved,
    MissingQuestion,
    MissingOption(Letter),
    StoreError(String),
}

pub fn intake(
    form: &IntakeForm,
    message: AdminMessage,
    sizes: Option<PoolSizes>,
    locale: &str,
) -> Markup {
    let notice = match message {
        AdminMessage::None => None,
        AdminMessage::Saved => Some((true, t!("admin.saved", locale = locale).to_string())),
        AdminMessage::MissingQuestion => Some((
            false,
            t!("admin.missing_question", locale = locale).to_string(),
        )),
        AdminMessage::MissingOption(letter) => Some((
            false,
            t!("admin.missing_option", locale = locale, letter = letter).to_string(),
        )),
        AdminMessage::StoreError(message) => Some((
            false,
            t!("admin.store_error", locale = locale, message = message).to_string(),
        )),
    };

    html! {
        h1 { (t!("admin.title", locale = locale)) }

        @if let Some(sizes) = sizes {
            p."secondary" {
                @let (classic, traits) = (sizes.classic, sizes.traits);
                (t!("admin.pool_sizes", locale = locale, classic = classic, traits = traits))
            }
        }

        article {
            form hx-post=(names::ADMIN_URL) hx-target="main" hx-disabled-elt="find button" {
                label {
                    (t!("admin.pool", locale = locale))
                    select name="pool" {
                        option value="classic" selected[form.pool == Pool::Classic] {
                            (t!("admin.pool_classic", locale = locale))
                        }
                        option value="trait" selected[form.pool == Pool::Trait] {
                            (t!("admin.pool_trait", locale = locale))
                        }
                    }
                }
                label {
                    (t!("admin.question", locale = locale))
                    textarea name="question"
                             rows="3"
                             placeholder=(t!("admin.question_placeholder", locale = locale)) {
                        (form.question)
                    }
                }
                label {
                    (t!("admin.options", locale = locale))
                    textarea name="raw_options"
                             rows="6"
                             placeholder=(t!("admin.options_placeholder", locale = locale)) {
                        (form.raw_options)
                    }
                }
                @if let Some((ok, text)) = notice {
                    @if ok {
                        p.notice-ok role="status" { (text) }
                    } @else {
                        p.notice-error role="alert" { (text) }
                    }
                }
                button type="submit" { (t!("admin.submit", locale = locale)) }
            }
        }
    }
}
