//! TeX rendering of polynomials and factored transfer functions

use rustctl_types::TexSettings;

use crate::polynomial::Polynomial;
use crate::transfer_function::TransferFunction;

/// Format `value` with at most `digits` significant digits, trailing zeros
/// removed
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }

    let digits = digits.max(1) as i32;
    let exponent = value.abs().log10().floor() as i32;
    let decimals = digits - 1 - exponent;

    let text = if decimals >= 0 {
        format!("{:.*}", decimals as usize, value)
    } else {
        let scale = 10f64.powi(-decimals);
        format!("{}", (value / scale).round() * scale)
    };

    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Coefficient text: significant digits, or `m \cdot 10^{e}` when that is
/// too long
fn coefficient(value: f64, settings: &TexSettings) -> String {
    let text = format_significant(value, settings.maximum_significant_digits);
    let allowed = settings.maximum_digits + usize::from(text.contains('.'));

    if text.len() > allowed {
        let exponent = value.abs().log10().floor() as i32;
        let mantissa = format_significant(
            value / 10f64.powi(exponent),
            settings.maximum_significant_digits,
        );
        format!("{mantissa} \\cdot 10^{{{exponent}}}")
    } else {
        text
    }
}

/// `2+3.5p-p^{2}`-style rendering, ascending powers
pub fn polynomial_tex(polynomial: &Polynomial, settings: &TexSettings) -> String {
    let variable = settings.laplace_variable;
    let mut tex = String::new();

    for (order, &value) in polynomial.coefficients().iter().enumerate() {
        if value == 0.0 {
            continue;
        }

        let value_text = if value == 1.0 {
            String::new()
        } else {
            coefficient(value, settings)
        };

        let order_text = match order {
            0 => String::new(),
            1 => variable.to_string(),
            _ => format!("{variable}^{{{order}}}"),
        };

        if value > 0.0 && !tex.is_empty() {
            tex.push('+');
        }

        if value_text.is_empty() && order_text.is_empty() {
            tex.push('1');
        } else {
            tex.push_str(&value_text);
            tex.push_str(&order_text);
        }
    }

    if tex.is_empty() {
        tex.push('0');
    }

    tex
}

fn product_tex(factors: &[Polynomial], settings: &TexSettings) -> String {
    if factors.is_empty() {
        return "1".to_string();
    }

    factors
        .iter()
        .map(|factor| {
            let tex = polynomial_tex(factor, settings);
            if factors.len() > 1 && factor.non_zero_count() > 1 {
                format!("\\left( {tex} \\right)")
            } else {
                tex
            }
        })
        .collect::<Vec<_>>()
        .join(" \\cdot ")
}

/// `\frac{N₁ \cdot N₂}{D₁}` keeping the factored form
pub fn transfer_function_tex(transfer_function: &TransferFunction, settings: &TexSettings) -> String {
    format!(
        "\\frac{{{}}}{{{}}}",
        product_tex(transfer_function.numerators(), settings),
        product_tex(transfer_function.denominators(), settings)
    )
}

impl Polynomial {
    pub fn tex(&self) -> String {
        polynomial_tex(self, &TexSettings::default())
    }
}

impl TransferFunction {
    pub fn tex(&self) -> String {
        transfer_function_tex(self, &TexSettings::default())
    }
}
