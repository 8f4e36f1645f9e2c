//! Quote notification email: an HTML document built for old and new mail
//! clients alike (table layout, inline styles, VML button for Outlook) and a
//! plain-text fallback carrying the same information.
//!
//! Every user-supplied value goes through [`escape_html`] before it reaches
//! markup. Rendering is a pure function of the quote, its metadata and the
//! template options.

use url::Url;

use crate::config::TemplateConfig;
use crate::model::quote::{QuoteFormData, SubmissionMeta};
use crate::util::locale::{format_datetime_long, format_datetime_short};
use crate::util::phone::{digits_only, format_phone};

/// Rendered for absent or blank values.
pub const PLACEHOLDER: &str = "—";
const NOT_INFORMED: &str = "Não informado";

const BASE_FONT: &str = "font-family: Inter, -apple-system, Segoe UI, Roboto, Arial, sans-serif;";
const CONTAINER_SHADOW: &str = "box-shadow:0 4px 24px rgba(0,0,0,0.08)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub html: String,
    pub text: String,
}

/// Escape `& < > " '`, trim, and fall back to the placeholder when blank.
pub fn escape_html(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER.to_string();
    }
    html_escape::encode_quoted_attribute(trimmed).into_owned()
}

fn plain(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Click-to-chat link for a Brazilian number. Eleven digits are always
/// prefixed with 55; shorter numbers only when they do not already start with it.
pub fn whatsapp_link(phone: &str) -> String {
    let digits = digits_only(phone);
    if digits.is_empty() {
        return String::new();
    }
    let with_country = if digits.len() == 11 || !digits.starts_with("55") {
        format!("55{}", digits)
    } else {
        digits
    };
    format!("https://wa.me/{}", with_country)
}

/// Add utm_source/utm_medium/utm_campaign unless already present.
/// Strings that do not parse as URLs are returned untouched.
pub fn with_utm(url: &str, enable: bool) -> String {
    if !enable {
        return url.to_string();
    }
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let existing: Vec<String> = parsed.query_pairs().map(|(k, _)| k.into_owned()).collect();
    {
        let mut pairs = parsed.query_pairs_mut();
        for (key, value) in [
            ("utm_source", "crm-email"),
            ("utm_medium", "transactional"),
            ("utm_campaign", "quote"),
        ] {
            if !existing.iter().any(|k| k == key) {
                pairs.append_pair(key, value);
            }
        }
    }
    parsed.to_string()
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Numbers print without a trailing `.0`, matching how the catalog lists them.
fn number(value: f64) -> String {
    format!("{}", value)
}

fn cta_button(opt: &TemplateConfig) -> String {
    let Some(cta_url) = opt.cta_url.as_deref().filter(|u| !u.trim().is_empty()) else {
        return String::new();
    };
    let href = escape_html(&with_utm(cta_url, opt.add_utm));
    let label = escape_html(&opt.cta_label);
    let primary = &opt.primary;
    format!(
        r#"
      <!--[if mso]>
      <v:roundrect xmlns:v="urn:schemas-microsoft-com:vml" xmlns:w="urn:schemas-microsoft-com:office:word" href="{href}" style="height:44px;v-text-anchor:middle;width:200px;" arcsize="12%" stroke="f" fillcolor="{primary}">
        <w:anchorlock/>
        <center style="color:#FFFFFF;font-family:Arial,sans-serif;font-size:14px;font-weight:bold;">{label}</center>
      </v:roundrect>
      <![endif]-->
      <!--[if !mso]><!-- -->
      <a href="{href}" target="_blank"
         style="{BASE_FONT} display:inline-block;background:{primary};color:#FFFFFF;text-decoration:none;border-radius:8px;padding:12px 20px;font-weight:700;font-size:14px;">
        {label}
      </a>
      <!--<![endif]-->
    "#
    )
}

fn spec_cards(data: &QuoteFormData, opt: &TemplateConfig) -> String {
    let machine = &data.machine;
    let specs = [
        (
            "Capacidade",
            format!(
                "{} {}",
                escape_html(&number(machine.capacity)),
                escape_html(&machine.capacity_unit)
            ),
        ),
        ("Potência", format!("{}kW", escape_html(&number(machine.power_consumption)))),
        ("Área", escape_html(&machine.footprint)),
    ];

    let cells: String = specs
        .iter()
        .map(|(label, value)| {
            format!(
                r#"
          <td align="center" valign="top" width="33%" style="background:{surface};border:1px solid {border};border-radius:8px;padding:12px;">
            <div style="{BASE_FONT} color:{primary};font-weight:800;font-size:15px;line-height:1.2;">{value}</div>
            <div style="{BASE_FONT} color:{muted};font-size:12px;line-height:1.4;margin-top:4px;">{label}</div>
          </td>"#,
                surface = opt.surface,
                border = opt.border,
                primary = opt.primary,
                muted = opt.muted_text,
            )
        })
        .collect();

    format!(
        r#"
    <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="border-collapse:separate;border-spacing:12px 0;">
      <tr>
        {cells}
      </tr>
    </table>
  "#
    )
}

fn message_block(data: &QuoteFormData, opt: &TemplateConfig) -> String {
    let Some(message) = data.submission.message.as_deref().filter(|m| !m.trim().is_empty()) else {
        return String::new();
    };
    format!(
        r#"
          <!-- Client message -->
          <tr>
            <td class="px" style="padding:20px;border-bottom:1px solid {border};">
              <h2 style="{BASE_FONT} font-size:16px;line-height:1.3;margin:0 0 8px;color:{text};font-weight:800;">Mensagem do Cliente</h2>
              <div style="{BASE_FONT} color:{muted};font-size:14px;line-height:1.6;background:{background};border:1px solid {border};border-radius:8px;padding:12px;">{message}</div>
            </td>
          </tr>
          "#,
        border = opt.border,
        text = opt.text,
        muted = opt.muted_text,
        background = opt.background,
        message = escape_html(message),
    )
}

/// HTML body of the quote notification.
pub fn render_html(data: &QuoteFormData, meta: &SubmissionMeta, opt: &TemplateConfig) -> String {
    let submission = &data.submission;
    let machine = &data.machine;

    let received_at = escape_html(&format_datetime_short(&meta.received_at));
    let brand = escape_html(&opt.brand_name);
    let name = escape_html(&submission.name);
    let company = escape_html(submission.company.as_deref().unwrap_or(NOT_INFORMED));
    let email = escape_html(&submission.email);
    let phone_display = escape_html(&format_phone(&submission.phone));
    let chat_link = escape_html(&whatsapp_link(&submission.phone));
    let machine_title = escape_html(&machine.title);
    let machine_subtitle = escape_html(&machine.subtitle);
    let preview_text = format!("Nova cotação: {} - {}", machine_title, name);

    let cta = cta_button(opt);
    let cta_row = if cta.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="center" style="margin-top:8px;">{}</div>"#, cta)
    };
    let address = opt
        .address_line
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .map(|a| format!("<br/>{}", escape_html(a)))
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="pt-BR">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width,initial-scale=1">
  <title>{brand} - Nova Cotação</title>
  <style>
    @media (max-width:640px) {{
      .container {{ width:100% !important; max-width:100% !important; }}
      .px {{ padding-left:16px !important; padding-right:16px !important; }}
      .stack {{ display:block !important; width:100% !important; }}
      .stack td {{ display:block !important; width:100% !important; }}
      .center {{ text-align:center !important; }}
    }}
    @media (prefers-color-scheme: dark) {{
      :root {{ color-scheme: dark; }}
    }}
  </style>
</head>
<body style="margin:0;padding-top:20px;padding-bottom:20px;background:{background};{BASE_FONT} color:{text};">
  <div style="display:none;max-height:0;overflow:hidden;opacity:0;color:transparent;">{preview_text}</div>

  <table role="presentation" border="0" cellpadding="0" cellspacing="0" align="center" width="100%" style="max-width:600px;">
    <tr>
      <td class="px" style="padding:0;">

        <table role="presentation" width="100%" cellpadding="0" cellspacing="0" class="container" style="background:{surface};border:1px solid {border};border-radius:12px;overflow:hidden;{CONTAINER_SHADOW}">

          <!-- Header -->
          <tr>
            <td align="center" style="padding:24px;border-bottom:1px solid {border};">
              <img src="cid:{logo_cid}" alt="{brand}" width="140" height="140" style="display:block;max-width:100%;height:auto;border-radius:12px;margin:0 auto 12px;" />
              <h1 style="{BASE_FONT} margin:8px 0 4px;font-size:20px;line-height:1.3;color:{text};font-weight:800;">Nova Solicitação de Cotação</h1>
              <p style="{BASE_FONT} margin:0;color:{muted};font-size:14px;">Recebido em {received_at}</p>
              <div style="margin-top:12px;display:inline-block;background:{primary}15;color:{primary};padding:6px 12px;border-radius:999px;{BASE_FONT} font-weight:700;font-size:12px;">Lead Qualificado</div>
            </td>
          </tr>

          <!-- Summary -->
          <tr>
            <td class="px" style="padding:20px;border-bottom:1px solid {border};">
              <table role="presentation" width="100%" cellpadding="0" cellspacing="0">
                <tr class="stack">
                  <td width="50%" style="vertical-align:top;padding-right:10px;">
                    <div style="{BASE_FONT} color:{muted};font-size:12px;margin-bottom:4px;">Máquina</div>
                    <div style="{BASE_FONT} color:{primary};font-size:16px;font-weight:800;">{machine_title}</div>
                    <div style="{BASE_FONT} color:{muted};font-size:13px;margin-top:4px;">{machine_subtitle}</div>
                  </td>
                  <td width="50%" style="vertical-align:top;padding-left:10px;">
                    <div style="{BASE_FONT} color:{muted};font-size:12px;margin-bottom:4px;">Contato</div>
                    <div style="{BASE_FONT} color:{text};font-size:16px;font-weight:700;">{name}</div>
                    <div style="{BASE_FONT} color:{muted};font-size:13px;margin-top:4px;">{company}</div>
                  </td>
                </tr>
              </table>
            </td>
          </tr>

          <!-- Specifications -->
          <tr>
            <td class="px" style="padding:20px;border-bottom:1px solid {border};">
              <h2 style="{BASE_FONT} font-size:16px;line-height:1.3;margin:0 0 12px;color:{text};font-weight:800;">Especificações</h2>
              {specs}
            </td>
          </tr>

          <!-- Contact -->
          <tr>
            <td class="px" style="padding:20px;border-bottom:1px solid {border};">
              <h2 style="{BASE_FONT} font-size:16px;line-height:1.3;margin:0 0 12px;color:{text};font-weight:800;">Informações de Contato</h2>
              <table role="presentation" width="100%" cellpadding="0" cellspacing="0">
                <tr class="stack">
                  <td width="50%" style="vertical-align:top;padding-right:10px;">
                    <div style="{BASE_FONT} font-weight:600;color:{text};font-size:14px;">Nome</div>
                    <div style="{BASE_FONT} color:{muted};font-size:14px;margin:4px 0 12px;">{name}</div>
                    <div style="{BASE_FONT} font-weight:600;color:{text};font-size:14px;">Empresa</div>
                    <div style="{BASE_FONT} color:{muted};font-size:14px;margin:4px 0 12px;">{company}</div>
                  </td>
                  <td width="50%" style="vertical-align:top;padding-left:10px;">
                    <div style="{BASE_FONT} font-weight:600;color:{text};font-size:14px;">E-mail</div>
                    <div style="{BASE_FONT} font-size:14px;margin:4px 0 12px;"><a href="mailto:{email}" style="color:{primary};text-decoration:none;">{email}</a></div>
                    <div style="{BASE_FONT} font-weight:600;color:{text};font-size:14px;">Telefone</div>
                    <div style="{BASE_FONT} font-size:14px;margin:4px 0 12px;"><a href="{chat_link}" target="_blank" style="color:{primary};text-decoration:none;">{phone_display}</a></div>
                  </td>
                </tr>
              </table>
              {cta_row}
            </td>
          </tr>
{message_block}
          <!-- Footer -->
          <tr>
            <td align="center" style="padding:20px;background:{background};">
              <div style="{BASE_FONT} color:{text};font-weight:700;font-size:15px;margin-bottom:4px;">{brand}</div>
              <div style="{BASE_FONT} color:{muted};font-size:13px;margin-bottom:12px;">Soluções Profissionais em Embalagens</div>
              <div style="{BASE_FONT} color:{muted};font-size:12px;line-height:1.6;">
                <a href="mailto:{support_email}" style="color:{primary};text-decoration:none;">{support_email}</a><br/>
                <a href="{site_url}" style="color:{primary};text-decoration:none;">{site_label}</a>{address}
              </div>
              <div style="{BASE_FONT} color:{muted};font-size:11px;margin-top:12px;padding-top:12px;border-top:1px solid {border};">E-mail gerado automaticamente pelo sistema de cotações</div>
            </td>
          </tr>

        </table>

      </td>
    </tr>
  </table>
</body>
</html>"#,
        background = opt.background,
        text = opt.text,
        muted = opt.muted_text,
        primary = opt.primary,
        surface = opt.surface,
        border = opt.border,
        logo_cid = escape_html(&opt.logo_cid),
        specs = spec_cards(data, opt),
        message_block = message_block(data, opt),
        support_email = escape_html(&opt.support_email),
        site_url = escape_html(&opt.site_url),
        site_label = escape_html(strip_scheme(&opt.site_url)),
    )
}

/// Plain-text fallback with the same fields as the HTML body.
pub fn render_text(data: &QuoteFormData, meta: &SubmissionMeta, brand: &str) -> String {
    let submission = &data.submission;
    let machine = &data.machine;

    let mut out = String::new();
    out.push_str(&format!("{} - Nova Cotação\n\n", plain(brand)));
    out.push_str(&format!("MÁQUINA: {}\n", plain(&machine.title)));
    out.push_str(&format!("Descrição: {}\n", plain(&machine.subtitle)));
    out.push_str(&format!("Categoria: {}\n", machine.category));
    out.push_str(&format!(
        "Capacidade: {} {}\n",
        number(machine.capacity),
        plain(&machine.capacity_unit)
    ));
    out.push_str(&format!("Potência: {}kW\n", number(machine.power_consumption)));
    out.push_str(&format!("Área: {}\n", plain(&machine.footprint)));
    out.push_str(&format!("ID da máquina: {}\n\n", plain(&machine.id)));

    out.push_str("CLIENTE:\n");
    out.push_str(&format!("Nome: {}\n", plain(&submission.name)));
    out.push_str(&format!(
        "Empresa: {}\n",
        submission.company.as_deref().map(plain).unwrap_or_else(|| NOT_INFORMED.to_string())
    ));
    out.push_str(&format!("E-mail: {}\n", plain(&submission.email)));
    out.push_str(&format!("Telefone: {}\n", plain(&format_phone(&submission.phone))));
    if let Some(message) = submission.message.as_deref().filter(|m| !m.trim().is_empty()) {
        out.push_str(&format!("Mensagem: {}\n", plain(message)));
    }

    out.push('\n');
    out.push_str(&format!("Data: {}\n", format_datetime_long(&meta.received_at)));
    out.push_str(&format!("ID: {}", meta.request_id));
    out
}

/// Both bodies of the quote notification.
pub fn render_quote_email(data: &QuoteFormData, meta: &SubmissionMeta, opt: &TemplateConfig) -> RenderedEmail {
    RenderedEmail {
        html: render_html(data, meta, opt),
        text: render_text(data, meta, &opt.brand_name),
    }
}

/// Subject line of the notification sent to the sales mailbox.
pub fn quote_subject(data: &QuoteFormData) -> String {
    format!("Nova Cotação: {} - {}", data.machine.title, data.submission.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::machine::{MachineCategory, MachineSnapshot};
    use crate::model::quote::QuoteSubmission;
    use chrono::{Local, TimeZone};
    use uuid::Uuid;

    fn quote() -> QuoteFormData {
        QuoteFormData {
            submission: QuoteSubmission {
                name: "Maria Oliveira".to_string(),
                email: "maria@acme.com".to_string(),
                phone: "11988887777".to_string(),
                company: Some("Acme".to_string()),
                message: None,
            },
            machine: MachineSnapshot {
                id: "speed-line".to_string(),
                title: "Linha Speed".to_string(),
                subtitle: "Stand-Up Pouch Industrial Premium".to_string(),
                capacity: 5400.0,
                capacity_unit: "un/h".to_string(),
                power_consumption: 8.97,
                footprint: "5.3 x 3.3m".to_string(),
                category: MachineCategory::Premium,
            },
        }
    }

    fn meta() -> SubmissionMeta {
        SubmissionMeta {
            request_id: Uuid::nil(),
            received_at: Local.with_ymd_and_hms(2026, 10, 16, 14, 5, 33).single().unwrap(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
        assert!(!escape_html("\"quoted\"").contains('"'));
        assert!(!escape_html("O'Neil").contains('\''));
        assert_eq!(escape_html("   "), PLACEHOLDER);
        assert_eq!(escape_html(" Acme "), "Acme");
    }

    #[test]
    fn test_whatsapp_link() {
        assert_eq!(whatsapp_link("(11) 98888-7777"), "https://wa.me/5511988887777");
        assert_eq!(whatsapp_link("5511988887777"), "https://wa.me/5511988887777");
        assert_eq!(whatsapp_link("1134567890"), "https://wa.me/551134567890");
        // Eleven digits are treated as local even if they begin with 55.
        assert_eq!(whatsapp_link("55999998888"), "https://wa.me/5555999998888");
        assert_eq!(whatsapp_link(""), "");
    }

    #[test]
    fn test_with_utm() {
        let tagged = with_utm("https://crm.example.com/leads", true);
        assert!(tagged.contains("utm_source=crm-email"));
        assert!(tagged.contains("utm_medium=transactional"));
        assert!(tagged.contains("utm_campaign=quote"));

        let kept = with_utm("https://crm.example.com/leads?utm_source=newsletter", true);
        assert!(kept.contains("utm_source=newsletter"));
        assert!(!kept.contains("utm_source=crm-email"));

        assert_eq!(with_utm("https://crm.example.com", false), "https://crm.example.com");
        assert_eq!(with_utm("not a url", true), "not a url");
    }

    #[test]
    fn test_html_contains_sections() {
        let html = render_html(&quote(), &meta(), &TemplateConfig::default());
        assert!(html.contains("Recebido em 16/10/2026, 14:05"));
        assert!(html.contains("Linha Speed"));
        assert!(html.contains("5400 un/h"));
        assert!(html.contains("8.97kW"));
        assert!(html.contains("5.3 x 3.3m"));
        assert!(html.contains("mailto:maria@acme.com"));
        assert!(html.contains("https://wa.me/5511988887777"));
        assert!(html.contains("(11) 98888-7777"));
        assert!(html.contains("cid:logo"));
        assert!(html.contains(">profills-carton.com<"));
        assert!(!html.contains("Mensagem do Cliente"));
        assert!(!html.contains("v:roundrect"));
    }

    #[test]
    fn test_html_escapes_injected_markup() {
        let mut data = quote();
        data.submission.name = "<script>alert(1)</script>".to_string();
        data.submission.message = Some("<img src=x onerror=alert(1)>".to_string());
        let html = render_html(&data, &meta(), &TemplateConfig::default());
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_absent_optionals_never_render_undefined() {
        let mut data = quote();
        data.submission.company = None;
        data.submission.message = None;
        let rendered = render_quote_email(&data, &meta(), &TemplateConfig::default());
        for body in [&rendered.html, &rendered.text] {
            assert!(!body.contains("undefined"));
            assert!(!body.contains("null"));
            assert!(!body.contains("None"));
        }
        assert!(rendered.html.contains(NOT_INFORMED));
        assert!(rendered.text.contains("Empresa: Não informado"));
    }

    #[test]
    fn test_blank_machine_field_renders_placeholder() {
        let mut data = quote();
        data.machine.footprint = "  ".to_string();
        let rendered = render_quote_email(&data, &meta(), &TemplateConfig::default());
        assert!(rendered.html.contains(PLACEHOLDER));
        assert!(rendered.text.contains("Área: —"));
    }

    #[test]
    fn test_message_block_only_when_present() {
        let mut data = quote();
        data.submission.message = Some("Preciso de 2 unidades".to_string());
        let rendered = render_quote_email(&data, &meta(), &TemplateConfig::default());
        assert!(rendered.html.contains("Mensagem do Cliente"));
        assert!(rendered.html.contains("Preciso de 2 unidades"));
        assert!(rendered.text.contains("Mensagem: Preciso de 2 unidades\n"));
    }

    #[test]
    fn test_cta_button_variants() {
        let options = TemplateConfig {
            cta_url: Some("https://crm.example.com/leads".to_string()),
            address_line: Some("Rua das Máquinas, 100".to_string()),
            ..TemplateConfig::default()
        };
        let html = render_html(&quote(), &meta(), &options);
        assert!(html.contains("<!--[if mso]>"));
        assert!(html.contains("v:roundrect"));
        assert!(html.contains("<!--[if !mso]><!-- -->"));
        assert!(html.contains("utm_campaign=quote"));
        assert!(html.contains("Ver no CRM"));
        assert!(html.contains("<br/>Rua das Máquinas, 100"));
    }

    #[test]
    fn test_text_fallback_order() {
        let text = render_text(&quote(), &meta(), "Profills Carton");
        let expected = "Profills Carton - Nova Cotação\n\n\
MÁQUINA: Linha Speed\n\
Descrição: Stand-Up Pouch Industrial Premium\n\
Categoria: premium\n\
Capacidade: 5400 un/h\n\
Potência: 8.97kW\n\
Área: 5.3 x 3.3m\n\
ID da máquina: speed-line\n\n\
CLIENTE:\n\
Nome: Maria Oliveira\n\
Empresa: Acme\n\
E-mail: maria@acme.com\n\
Telefone: (11) 98888-7777\n\n\
Data: 16/10/2026, 14:05:33\n\
ID: 00000000-0000-0000-0000-000000000000";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let options = TemplateConfig::default();
        let first = render_quote_email(&quote(), &meta(), &options);
        let second = render_quote_email(&quote(), &meta(), &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_timestamp_differs_between_requests() {
        let options = TemplateConfig::default();
        let earlier = meta();
        let later = SubmissionMeta {
            received_at: Local.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).single().unwrap(),
            ..meta()
        };
        let a = render_quote_email(&quote(), &earlier, &options);
        let b = render_quote_email(&quote(), &later, &options);
        assert_ne!(a.html, b.html);
        assert_eq!(
            a.html.replace("16/10/2026, 14:05", "TS"),
            b.html.replace("17/10/2026, 09:30", "TS")
        );
    }

    #[test]
    fn test_subject() {
        assert_eq!(quote_subject(&quote()), "Nova Cotação: Linha Speed - Maria Oliveira");
    }
}
