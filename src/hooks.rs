use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callbacks for a validated settings field.
///
/// The text state follows keystrokes freely; the typed value only changes
/// on commit (Enter or blur), after the parse/validate callback accepts the
/// text. Invalid commits leave the value untouched and surface an error.
#[derive(Clone)]
pub struct ValidatedInput<T: Clone + PartialEq + 'static> {
    /// Current text content of the input field.
    pub text: String,
    /// Last successfully committed value.
    pub value: T,
    /// Error message from the most recent failed commit.
    pub error: Option<String>,
    /// `oninput` handler keeping the text state in sync with the field.
    pub on_text_input: Callback<InputEvent>,
    /// Parse and validate the current text; wire to `onchange` and Enter.
    pub on_commit: Callback<()>,
    /// Programmatically set the value (e.g. when a preset is selected).
    /// Updates the text to the canonical form and clears any error.
    pub set_value: Callback<T>,
}

/// Custom hook managing one validated input field.
#[hook]
pub fn use_validated_input<T: Clone + PartialEq + std::fmt::Display + 'static>(
    initial_value: T,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, String>>,
) -> ValidatedInput<T> {
    let value_handle: UseStateHandle<T> = use_state(|| initial_value.clone());
    let text_handle: UseStateHandle<String> = use_state(|| initial_value.to_string());
    let error_handle: UseStateHandle<Option<String>> = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let text_handle = text_handle.clone();
        let value_setter = value_handle.clone();
        let error_setter = error_handle.clone();
        let parse_fn = parse_and_validate.clone();

        Callback::from(move |_| match parse_fn(&text_handle) {
            Ok(parsed) => {
                value_setter.set(parsed.clone());
                text_handle.set(parsed.to_string());
                error_setter.set(None);
            }
            Err(message) => {
                error_setter.set(Some(message));
            }
        })
    };

    let set_value = {
        let value_setter = value_handle.clone();
        let text_setter = text_handle.clone();
        let error_setter = error_handle.clone();
        Callback::from(move |new_value: T| {
            text_setter.set(new_value.to_string());
            value_setter.set(new_value);
            error_setter.set(None);
        })
    };

    ValidatedInput {
        text: (*text_handle).clone(),
        value: (*value_handle).clone(),
        error: (*error_handle).clone(),
        on_text_input,
        on_commit,
        set_value,
    }
}
