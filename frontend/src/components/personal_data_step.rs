use chrono::{Datelike, Utc};
use club_card_core::FieldChange;
use shared::{FormErrors, FormField, PersonalDataForm, HUNGARIAN_MONTHS};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PersonalDataStepProps {
    pub form: PersonalDataForm,
    pub errors: FormErrors,
    /// A submission is in flight
    pub busy: bool,
    /// The data was already sent; the form is shown read-only
    pub completed: bool,
    pub min_birth_year: i32,

    pub on_field_change: Callback<FieldChange>,
    pub on_submit: Callback<()>,
    pub on_simulate: Callback<()>,
    pub on_resume: Callback<()>,
}

fn field_error(errors: &FormErrors, field: FormField) -> Html {
    match errors.message(field) {
        Some(message) => html! { <p class="field-error">{message}</p> },
        None => html! {},
    }
}

fn input_classes(errors: &FormErrors, field: FormField) -> Classes {
    classes!("form-input", errors.contains(field).then_some("form-input-invalid"))
}

/// Forward the text of an input element as a field change
fn on_text(
    on_field_change: &Callback<FieldChange>,
    to_change: fn(String) -> FieldChange,
) -> Callback<InputEvent> {
    on_field_change.reform(move |e: InputEvent| {
        to_change(e.target_unchecked_into::<HtmlInputElement>().value())
    })
}

#[function_component(PersonalDataStep)]
pub fn personal_data_step(props: &PersonalDataStepProps) -> Html {
    let form = &props.form;
    let errors = &props.errors;
    let disabled = props.busy || props.completed;
    let current_year = Utc::now().year();

    let on_month_change = props.on_field_change.reform(|e: Event| {
        FieldChange::BirthMonth(e.target_unchecked_into::<HtmlSelectElement>().value())
    });

    let on_privacy_change = props.on_field_change.reform(|e: Event| {
        FieldChange::AcceptedPrivacy(e.target_unchecked_into::<HtmlInputElement>().checked())
    });

    let on_form_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <div class="step-content personal-data-step">
            <h2>{"Személyes adatok"}</h2>

            <form class="personal-data-form" onsubmit={on_form_submit}>
                <div class="form-row">
                    <div class="form-group">
                        <label for="firstName">{"Keresztnév"}</label>
                        <input
                            id="firstName"
                            type="text"
                            class={input_classes(errors, FormField::FirstName)}
                            placeholder="János"
                            value={form.first_name.clone()}
                            oninput={on_text(&props.on_field_change, FieldChange::FirstName)}
                            {disabled}
                        />
                        {field_error(errors, FormField::FirstName)}
                    </div>
                    <div class="form-group">
                        <label for="lastName">{"Vezetéknév"}</label>
                        <input
                            id="lastName"
                            type="text"
                            class={input_classes(errors, FormField::LastName)}
                            placeholder="Kovács"
                            value={form.last_name.clone()}
                            oninput={on_text(&props.on_field_change, FieldChange::LastName)}
                            {disabled}
                        />
                        {field_error(errors, FormField::LastName)}
                    </div>
                </div>

                <div class="form-group">
                    <label>{"Születési dátum"}</label>
                    <div class="form-row birth-date-row">
                        <div>
                            <input
                                type="number"
                                class={input_classes(errors, FormField::BirthYear)}
                                placeholder="Év"
                                min={props.min_birth_year.to_string()}
                                max={current_year.to_string()}
                                value={form.birth_year.clone()}
                                oninput={on_text(&props.on_field_change, FieldChange::BirthYear)}
                                {disabled}
                            />
                            {field_error(errors, FormField::BirthYear)}
                        </div>
                        <div>
                            <select
                                class={input_classes(errors, FormField::BirthMonth)}
                                onchange={on_month_change}
                                {disabled}
                            >
                                <option value="" disabled=true selected={form.birth_month.is_empty()}>
                                    {"Hónap"}
                                </option>
                                {for HUNGARIAN_MONTHS.iter().map(|(code, name)| html! {
                                    <option
                                        key={*code}
                                        value={*code}
                                        selected={form.birth_month == *code}
                                    >
                                        {*name}
                                    </option>
                                })}
                            </select>
                            {field_error(errors, FormField::BirthMonth)}
                        </div>
                        <div>
                            <input
                                type="number"
                                class={input_classes(errors, FormField::BirthDay)}
                                placeholder="Nap"
                                min="1"
                                max="31"
                                value={form.birth_day.clone()}
                                oninput={on_text(&props.on_field_change, FieldChange::BirthDay)}
                                {disabled}
                            />
                            {field_error(errors, FormField::BirthDay)}
                        </div>
                    </div>
                </div>

                <div class="form-group">
                    <label for="email">{"Email cím"}</label>
                    <input
                        id="email"
                        type="email"
                        class={input_classes(errors, FormField::Email)}
                        placeholder="pelda@email.com"
                        value={form.email.clone()}
                        oninput={on_text(&props.on_field_change, FieldChange::Email)}
                        {disabled}
                    />
                    {field_error(errors, FormField::Email)}
                </div>

                <div class="form-group">
                    <label for="phone">{"Telefonszám"}</label>
                    <input
                        id="phone"
                        type="tel"
                        class={input_classes(errors, FormField::Phone)}
                        placeholder="+36 20 123 4567"
                        value={form.phone.clone()}
                        oninput={on_text(&props.on_field_change, FieldChange::Phone)}
                        {disabled}
                    />
                    {field_error(errors, FormField::Phone)}
                </div>

                <div class="form-group privacy-group">
                    <label class="checkbox-label" for="privacy">
                        <input
                            id="privacy"
                            type="checkbox"
                            checked={form.accepted_privacy}
                            onchange={on_privacy_change}
                            {disabled}
                        />
                        {"Tudomásul veszem és elfogadom az Adatkezelési tájékoztatót."}
                    </label>
                    {field_error(errors, FormField::AcceptedPrivacy)}
                </div>

                <div class="form-actions">
                    {if props.completed {
                        let on_resume = props.on_resume.reform(|_: MouseEvent| ());
                        html! {
                            <button type="button" class="btn btn-primary" onclick={on_resume}>
                                {"Tovább"}
                            </button>
                        }
                    } else {
                        let on_simulate = props.on_simulate.reform(|_: MouseEvent| ());
                        html! {
                            <>
                                <button type="submit" class="btn btn-primary" {disabled}>
                                    {if props.busy { "Mentés..." } else { "Fizetés" }}
                                </button>
                                <button
                                    type="button"
                                    class="btn btn-outline"
                                    onclick={on_simulate}
                                    {disabled}
                                >
                                    {"Szimulálás"}
                                </button>
                            </>
                        }
                    }}
                </div>
            </form>
        </div>
    }
}
