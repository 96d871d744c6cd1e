//! The user's colour theme: the picker, the endpoint that saves the choice,
//! and how the choice is persisted.

use std::{fmt::Display, str::FromStr};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRefresh;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, EDIT_MODAL_ID, FORM_LABEL_STYLE},
    service::AppHandle,
    storage::KeyValueStore,
};

/// The storage key for the theme preference.
pub const THEME_KEY: &str = "user-theme";

/// The built-in colour themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light blue.
    Blue,
    /// Dark blue.
    DarkBlue,
    /// Light brown.
    #[default]
    Brown,
    /// Dark brown.
    DarkBrown,
}

impl Theme {
    /// Every theme, in the order shown in the picker.
    pub const ALL: [Theme; 4] = [Theme::Blue, Theme::DarkBlue, Theme::Brown, Theme::DarkBrown];

    /// The CSS class applied to the page body, which is also the stored value.
    pub fn class_name(self) -> &'static str {
        match self {
            Theme::Blue => "blue-theme",
            Theme::DarkBlue => "dark-blue-theme",
            Theme::Brown => "brown-theme",
            Theme::DarkBrown => "dark-brown-theme",
        }
    }

    /// The name shown to the user.
    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Blue => "Blue",
            Theme::DarkBlue => "Dark blue",
            Theme::Brown => "Brown",
            Theme::DarkBrown => "Dark brown",
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.class_name() == s)
            .ok_or_else(|| Error::UnknownTheme(s.to_owned()))
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Load the saved theme, falling back to the default theme if none was saved
/// or the saved value cannot be used.
pub fn load_theme(store: &impl KeyValueStore) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(text)) => text.parse().unwrap_or_else(|error| {
            tracing::warn!("Ignoring saved theme: {error}");
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(error) => {
            tracing::error!("Error loading theme: {error}");
            Theme::default()
        }
    }
}

/// Save `theme` as the theme preference. Failures are logged.
pub fn save_theme(store: &mut impl KeyValueStore, theme: Theme) {
    if let Err(error) = store.set(THEME_KEY, theme.class_name()) {
        tracing::error!("Error saving theme {theme}: {error}");
    }
}

/// The state needed for the theme endpoints.
#[derive(Debug, Clone)]
pub struct ThemeState {
    pub app: AppHandle,
}

impl FromRef<AppState> for ThemeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            app: state.app.clone(),
        }
    }
}

fn theme_picker_view(current: Theme) -> Markup {
    html! {
        form
            class="theme-picker"
            hx-post=(endpoints::THEME_API)
            hx-target-error="#alert-container"
        {
            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Theme" }

                @for theme in Theme::ALL {
                    @let id = format!("theme-{}", theme.class_name());

                    div class="radio-option"
                    {
                        input
                            type="radio"
                            name="theme"
                            id=(id)
                            value=(theme.class_name())
                            checked[theme == current]
                            required;

                        label for=(id) { (theme.display_name()) }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }

            button
                type="button"
                class=(BUTTON_SECONDARY_STYLE)
                onclick=(format!("document.getElementById('{EDIT_MODAL_ID}').replaceChildren()"))
            {
                "Cancel"
            }
        }
    }
}

/// Render the theme picker with the current theme selected.
pub async fn get_theme_picker(State(state): State<ThemeState>) -> Response {
    match state.app.page().await {
        Ok(page) => theme_picker_view(page.theme).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// The form data for choosing a theme.
#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub theme: String,
}

/// Save the chosen theme and have the browser reload the page so the new
/// theme is applied.
pub async fn set_theme_endpoint(
    State(state): State<ThemeState>,
    Form(form): Form<ThemeForm>,
) -> Response {
    let theme = match form.theme.parse::<Theme>() {
        Ok(theme) => theme,
        Err(error) => return error.into_alert_response(),
    };

    match state.app.set_theme(theme).await {
        Ok(theme) => {
            tracing::info!("Theme set to {theme}");
            (HxRefresh(true), StatusCode::OK).into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}
