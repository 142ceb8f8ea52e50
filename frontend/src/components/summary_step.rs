use chrono::NaiveDate;
use club_card_core::domain::member_id::{qr_payload, QrErrorCorrection, QrPayload};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use shared::MemberRecord;
use yew::prelude::*;

use crate::services::logging::Logger;

pub const SUPPORT_EMAIL: &str = "info@goldhair.hu";

#[derive(Properties, PartialEq)]
pub struct SummaryStepProps {
    pub member: MemberRecord,
    pub qr_size_px: u32,
}

fn ec_level(level: QrErrorCorrection) -> EcLevel {
    match level {
        QrErrorCorrection::Low => EcLevel::L,
        QrErrorCorrection::Medium => EcLevel::M,
        QrErrorCorrection::Quartile => EcLevel::Q,
        QrErrorCorrection::High => EcLevel::H,
    }
}

/// Render the payload as an SVG document of at least `size` pixels
fn render_qr_svg(payload: &QrPayload, size: u32) -> Result<String, String> {
    let code = QrCode::with_error_correction_level(
        payload.data.as_bytes(),
        ec_level(payload.error_correction),
    )
    .map_err(|e| format!("Failed to encode QR code: {}", e))?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .quiet_zone(false)
        .dark_color(svg::Color("#1a1a1a"))
        .light_color(svg::Color("transparent"))
        .build())
}

/// Hungarian long date, e.g. "2025. 03. 01."
fn format_date(date: NaiveDate) -> String {
    date.format("%Y. %m. %d.").to_string()
}

#[function_component(SummaryStep)]
pub fn summary_step(props: &SummaryStepProps) -> Html {
    let member = &props.member;

    let qr = {
        let payload = qr_payload(member);
        let size = props.qr_size_px;
        use_memo((payload.data.clone(), size), move |_| {
            let rendered = render_qr_svg(&payload, size);
            if let Err(e) = &rendered {
                Logger::error_with_component("summary", e);
            }
            rendered
        })
    };

    let qr_html = match &*qr {
        Ok(svg) => Html::from_html_unchecked(AttrValue::from(svg.clone())),
        Err(_) => html! { <p class="field-error">{"A QR kód nem jeleníthető meg."}</p> },
    };

    let validity = match (member.membership_start, member.membership_end) {
        (Some(start), Some(end)) => html! {
            <p class="muted small">
                {format!("Érvényes: {} – {}", format_date(start), format_date(end))}
            </p>
        },
        _ => html! {},
    };

    let mailto = format!("mailto:{}", SUPPORT_EMAIL);

    html! {
        <div class="step-content summary-step">
            <h2>{"Sikeres regisztráció!"}</h2>

            <div class="qr-card" style={format!("width: {0}px; height: {0}px;", props.qr_size_px)}>
                {qr_html}
            </div>

            <div class="member-id-card">
                <p class="muted small">{"Azonosító"}</p>
                <p class="member-id">{&member.member_id}</p>
                {validity}
            </div>

            <div class="info-text">
                <p>
                    {"Klubtagságodhoz használható azonosítód és QR kódod emailben is elküldjük neked, \
                      kérjük ezeket mentsd le. Ha legközelebb nálunk jársz elég bemutatnod a kódot, \
                      hogy aktiváld klubtagságod."}
                </p>
                <p>
                    {"Amennyiben nem érkezne meg az email ellenőrizd a spam mappát vagy jelezd felénk az "}
                    <a href={mailto}>{SUPPORT_EMAIL}</a>
                    {" email címen."}
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_qr_svg() {
        let member = MemberRecord::new(
            "abcdef12-3456-4789-a012-3456789abcde".to_string(),
            "abcdef12-KOVÁCS".to_string(),
        );
        let svg = render_qr_svg(&qr_payload(&member), 140).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#1a1a1a"));
    }

    #[test]
    fn test_render_qr_svg_rejects_oversized_payload() {
        let payload = QrPayload {
            data: "X".repeat(4000),
            error_correction: QrErrorCorrection::High,
        };
        let err = render_qr_svg(&payload, 140).unwrap_err();
        assert!(err.starts_with("Failed to encode QR code"), "error: {}", err);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(format_date(date), "2025. 03. 01.");
    }
}
