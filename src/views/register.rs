use maud::{html, Markup};
use rust_i18n::t;

use crate::{models::Role, names};

/// Values typed into the registration form, kept across a failed submit.
#[derive(Debug, Default, Clone)]
pub struct RegisterForm {
    pub full_name: String,
    pub birthdate: String,
    pub role: String,
}

pub enum RegisterState {
    NoError,
    MissingName,
    MissingBirthdate,
    MissingRole,
    StoreError(String),
}

pub fn register(form: &RegisterForm, state: RegisterState, locale: &str) -> Markup {
    let error_msg = match state {
        RegisterState::NoError => None,
        RegisterState::MissingName => Some(t!("register.missing_name", locale = locale).to_string()),
        RegisterState::MissingBirthdate => {
            Some(t!("register.missing_birthdate", locale = locale).to_string())
        }
        RegisterState::MissingRole => Some(t!("register.missing_role", locale = locale).to_string()),
        RegisterState::StoreError(message) => {
            Some(t!("register.store_error", locale = locale, message = message).to_string())
        }
    };

    html! {
        h1 { (t!("register.title", locale = locale)) }
        article style="max-width: 32rem;" {
            form hx-post=(names::REGISTER_URL) hx-target="main" hx-disabled-elt="find button" {
                label {
                    (t!("register.full_name", locale = locale))
                    input name="full_name"
                          type="text"
                          autocomplete="name"
                          value=(form.full_name)
                          placeholder=(t!("register.full_name", locale = locale));
                }
                label {
                    (t!("register.birthdate", locale = locale))
                    input name="birthdate" type="date" value=(form.birthdate);
                }
                label {
                    (t!("register.role", locale = locale))
                    select name="role" {
                        option value="" selected[form.role.is_empty()] {
                            (t!("register.role_placeholder", locale = locale))
                        }
                        (role_option(Role::Student, "register.role_student", &form.role, locale))
                        (role_option(Role::Coach, "register.role_coach", &form.role, locale))
                    }
                }
                @if let Some(msg) = error_msg {
                    p.notice-error role="alert" { (msg) }
                }
                button type="submit" { (t!("register.submit", locale = locale)) }
            }
        }
    }
}

fn role_option(role: Role, label_key: &str, current: &str, locale: &str) -> Markup {
    html! {
        option value=(role.as_str()) selected[current == role.as_str()] {
            (t!(label_key, locale = locale))
        }
    }
}
