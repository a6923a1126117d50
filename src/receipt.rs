//! Plain-text receipt rendering for the unauthenticated client view.
//!
//! Layout is fixed-width with the shop header/footer centered, one
//! `quantity x price` line per product, the product name wrapped and
//! dot-padded against its line total, and the СУМА / payment / Решта block
//! right-aligned in the last ten columns. All padding counts characters, not
//! bytes — the labels are Cyrillic.

use crate::config::ReceiptStyle;
use crate::models::check::{Check, PaymentType};

pub fn render(check: &Check, style: &ReceiptStyle) -> String {
    let width = style.width;
    let name_width = width.saturating_sub(10);
    let mut lines: Vec<String> = Vec::new();

    lines.push(center(&style.header, width));
    lines.push("=".repeat(width));
    lines.push(String::new());

    for product in &check.products {
        lines.push(format!("{:.2} x {:.2}", product.quantity, product.price));
        let parts = wrap_name(&product.name, name_width);
        let Some(last) = parts.len().checked_sub(1) else {
            continue;
        };
        for (i, part) in parts.iter().enumerate() {
            if i < last {
                lines.push(format!("    {part}"));
            } else {
                let total = format!("{:.2}", product.total);
                let pad = width.saturating_sub(part.chars().count() + 4);
                lines.push(format!("    {}{}", part, rjust(&total, pad, '.')));
            }
        }
    }

    lines.push(String::new());
    lines.push("-".repeat(width));
    lines.push(amount_row("СУМА", check.total, width));
    let label = match check.payment.r#type {
        PaymentType::Cashless => "Картка",
        PaymentType::Cash => "Готівка",
    };
    lines.push(amount_row(label, check.payment.amount, width));
    lines.push(amount_row("Решта", check.rest, width));
    lines.push("=".repeat(width));
    lines.push(center(
        &check.created_at.format("%d.%m.%Y %H:%M").to_string(),
        width,
    ));
    lines.push(center(&style.footer, width));

    lines.join("\n")
}

fn amount_row(label: &str, amount: f64, width: usize) -> String {
    format!(
        "{}{}",
        ljust(label, width.saturating_sub(10)),
        rjust(&format!("{amount:.2}"), 10, ' ')
    )
}

/// Wrap a product name into chunks of at most `limit` characters, breaking on
/// the last space in the window and hard-breaking when there is none.
fn wrap_name(name: &str, limit: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut rest: Vec<char> = name.chars().collect();
    while !rest.is_empty() {
        if rest.len() <= limit {
            parts.push(rest.iter().collect());
            break;
        }
        let split = rest[..limit]
            .iter()
            .rposition(|c| *c == ' ')
            .unwrap_or(limit);
        parts.push(rest[..split].iter().collect());
        rest.drain(..split);
        while rest.first() == Some(&' ') {
            rest.remove(0);
        }
    }
    parts
}

fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

fn ljust(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(width - len))
}

fn rjust(s: &str, width: usize, fill: char) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    format!("{}{}", fill.to_string().repeat(width - len), s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::check::{PaymentInput, ProductInput};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn style() -> ReceiptStyle {
        ReceiptStyle {
            width: 40,
            header: "ФОП Петренко І.І.".to_string(),
            footer: "Дякуємо за покупку!".to_string(),
        }
    }

    fn sample_check(payment_type: PaymentType, names: &[&str]) -> Check {
        let products = names
            .iter()
            .map(|name| ProductInput {
                name: name.to_string(),
                price: 10.0,
                quantity: 2.0,
            })
            .collect();
        Check::from_parts(
            Uuid::new_v4(),
            chrono::Utc.with_ymd_and_hms(2024, 4, 1, 12, 30, 0).unwrap(),
            products,
            PaymentInput {
                r#type: payment_type,
                amount: 100.0,
            },
        )
    }

    #[test]
    fn test_fixed_width_rows() {
        let text = render(&sample_check(PaymentType::Cash, &["bread"]), &style());
        for line in text.lines() {
            assert!(
                line.chars().count() <= 40,
                "line wider than receipt: {line:?}"
            );
        }
        // rules span the full width
        assert!(text.lines().any(|l| l == "=".repeat(40)));
        assert!(text.lines().any(|l| l == "-".repeat(40)));
    }

    #[test]
    fn test_product_line_layout() {
        let text = render(&sample_check(PaymentType::Cash, &["bread"]), &style());
        assert!(text.contains("2.00 x 10.00"));
        // name indented 4, line total right-aligned with dot fill
        let line = text
            .lines()
            .find(|l| l.starts_with("    bread"))
            .expect("product name line");
        assert_eq!(line.chars().count(), 40);
        assert!(line.ends_with("20.00"));
        assert!(line.contains('.'));
    }

    #[test]
    fn test_totals_block() {
        let text = render(&sample_check(PaymentType::Cash, &["bread"]), &style());
        let total_line = text.lines().find(|l| l.starts_with("СУМА")).unwrap();
        assert_eq!(total_line.chars().count(), 40);
        assert!(total_line.ends_with("20.00"));
        let rest_line = text.lines().find(|l| l.starts_with("Решта")).unwrap();
        assert!(rest_line.ends_with("80.00"));
    }

    #[test]
    fn test_payment_labels() {
        let cash = render(&sample_check(PaymentType::Cash, &["bread"]), &style());
        assert!(cash.contains("Готівка"));
        assert!(!cash.contains("Картка"));

        let cashless = render(&sample_check(PaymentType::Cashless, &["bread"]), &style());
        assert!(cashless.contains("Картка"));
        assert!(!cashless.contains("Готівка"));
    }

    #[test]
    fn test_timestamp_format() {
        let text = render(&sample_check(PaymentType::Cash, &["bread"]), &style());
        assert!(text.contains("01.04.2024 12:30"));
    }

    #[test]
    fn test_long_name_wraps_on_spaces() {
        let name = "dishwasher-safe thermal mug with lid and extra gasket set";
        let text = render(&sample_check(PaymentType::Cash, &[name]), &style());
        // product block sits between the two blank lines
        let lines: Vec<&str> = text.lines().collect();
        let start = lines.iter().position(|l| l.is_empty()).unwrap() + 1;
        let end = lines[start..].iter().position(|l| l.is_empty()).unwrap() + start;
        let name_lines: Vec<&str> = lines[start..end]
            .iter()
            .filter(|l| l.starts_with("    "))
            .copied()
            .collect();
        assert!(name_lines.len() > 1, "expected a wrapped name");
        // only the final part carries the dot-padded total
        let (last, rest) = name_lines.split_last().unwrap();
        assert!(last.ends_with("20.00"));
        for line in rest {
            assert!(!line.ends_with("20.00"));
            assert!(line.chars().count() <= 34);
        }
    }

    #[test]
    fn test_wrap_name_hard_break_without_spaces() {
        let parts = wrap_name(&"x".repeat(70), 30);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].chars().count(), 30);
        assert_eq!(parts[1].chars().count(), 30);
        assert_eq!(parts[2].chars().count(), 10);
    }

    #[test]
    fn test_cyrillic_padding_counts_chars() {
        assert_eq!(ljust("СУМА", 30).chars().count(), 30);
        assert_eq!(center("Дякуємо", 40).chars().count(), 40);
        assert_eq!(rjust("980.00", 10, ' ').chars().count(), 10);
    }
}
