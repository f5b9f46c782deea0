//! Interactive collection of a [`Profile`].
//!
//! Each question shows the current default. An empty answer keeps it; an
//! answer that is not a non-negative number prints a notice and keeps it too.

use std::io::{self, BufRead, Write};

use fund_core::BonusTaxMethod;
use fund_data::Profile;
use rust_decimal::Decimal;
use tracing::debug;

use crate::report::method_label;
use crate::utils::parse_optional_decimal;

/// Asks questions on `output` and reads answers line by line from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(
        input: R,
        output: W,
    ) -> Self {
        Self { input, output }
    }

    /// Writes `question` and returns the trimmed answer. End of input reads
    /// as an empty answer.
    fn read_answer(
        &mut self,
        question: &str,
    ) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    pub fn ask_decimal(
        &mut self,
        label: &str,
        default: Decimal,
    ) -> io::Result<Decimal> {
        let answer = self.read_answer(&format!("{label} (default: {default}): "))?;

        match parse_optional_decimal(&answer) {
            Ok(None) => Ok(default),
            Ok(Some(value)) if value >= Decimal::ZERO => Ok(value),
            Ok(Some(_)) | Err(_) => {
                debug!(label, %answer, "answer rejected");
                writeln!(self.output, "Invalid input, using default {default}")?;
                Ok(default)
            }
        }
    }

    /// Choice `2` selects [`BonusTaxMethod::Separate`]; an empty answer keeps
    /// `default`; anything else selects [`BonusTaxMethod::Combined`].
    pub fn ask_method(
        &mut self,
        default: BonusTaxMethod,
    ) -> io::Result<BonusTaxMethod> {
        let default_choice = match default {
            BonusTaxMethod::Combined => "1",
            BonusTaxMethod::Separate => "2",
        };

        writeln!(self.output)?;
        writeln!(self.output, "Bonus tax method:")?;
        writeln!(self.output, "1. {}", method_label(BonusTaxMethod::Combined))?;
        writeln!(self.output, "2. {}", method_label(BonusTaxMethod::Separate))?;
        let answer = self.read_answer(&format!("Choose 1 or 2 (default: {default_choice}): "))?;

        let method = match answer.as_str() {
            "" => default,
            "2" => BonusTaxMethod::Separate,
            _ => BonusTaxMethod::Combined,
        };
        writeln!(self.output, "Selected: {}", method_label(method))?;
        Ok(method)
    }
}

/// Asks for every interactive field, starting from `defaults`.
///
/// Fields without a question (social-insurance rate, other deductions and
/// the sweep grid) are carried over unchanged.
pub fn collect_profile<R: BufRead, W: Write>(
    input: R,
    output: W,
    defaults: &Profile,
) -> io::Result<Profile> {
    let mut prompter = Prompter::new(input, output);

    writeln!(prompter.output, "{}", "=".repeat(60))?;
    writeln!(prompter.output, "Housing-fund optimizer inputs")?;
    writeln!(prompter.output, "{}", "=".repeat(60))?;

    Ok(Profile {
        monthly_salary: prompter.ask_decimal("Monthly salary", defaults.monthly_salary)?,
        annual_bonus: prompter.ask_decimal("Annual bonus", defaults.annual_bonus)?,
        social_insurance_base: prompter
            .ask_decimal("Social insurance base", defaults.social_insurance_base)?,
        special_deduction: prompter
            .ask_decimal("Special additional deduction", defaults.special_deduction)?,
        employer_fund_base: prompter
            .ask_decimal("Employer housing-fund base", defaults.employer_fund_base)?,
        fund_rate: prompter.ask_decimal("Housing-fund rate", defaults.fund_rate)?,
        bonus_tax_method: prompter.ask_method(defaults.bonus_tax_method)?,
        ..defaults.clone()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn collect(answers: &str) -> (Profile, String) {
        let mut output: Vec<u8> = Vec::new();
        let profile =
            collect_profile(answers.as_bytes(), &mut output, &Profile::default()).unwrap();
        (profile, String::from_utf8(output).unwrap())
    }

    // =========================================================================
    // Prompter tests
    // =========================================================================

    #[test]
    fn ask_decimal_accepts_answer() {
        let mut output: Vec<u8> = Vec::new();
        let mut prompter = Prompter::new("30,000\n".as_bytes(), &mut output);

        let value = prompter.ask_decimal("Monthly salary", dec!(22000)).unwrap();

        assert_eq!(value, dec!(30000));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Monthly salary (default: 22000): "
        );
    }

    #[test]
    fn ask_decimal_empty_answer_keeps_default() {
        let mut output: Vec<u8> = Vec::new();
        let mut prompter = Prompter::new("\n".as_bytes(), &mut output);

        assert_eq!(prompter.ask_decimal("Fund rate", dec!(0.12)).unwrap(), dec!(0.12));
    }

    #[test]
    fn ask_decimal_invalid_answer_keeps_default_with_notice() {
        let mut output: Vec<u8> = Vec::new();
        let mut prompter = Prompter::new("twelve\n-5\n".as_bytes(), &mut output);

        assert_eq!(prompter.ask_decimal("Bonus", dec!(60000)).unwrap(), dec!(60000));
        assert_eq!(prompter.ask_decimal("Bonus", dec!(60000)).unwrap(), dec!(60000));

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid input, using default 60000").count(), 2);
    }

    #[test]
    fn ask_decimal_end_of_input_keeps_default() {
        let mut output: Vec<u8> = Vec::new();
        let mut prompter = Prompter::new("".as_bytes(), &mut output);

        assert_eq!(prompter.ask_decimal("Bonus", dec!(60000)).unwrap(), dec!(60000));
    }

    #[test]
    fn ask_method_choices() {
        let cases = [
            ("2\n", BonusTaxMethod::Combined, BonusTaxMethod::Separate),
            ("1\n", BonusTaxMethod::Separate, BonusTaxMethod::Combined),
            ("x\n", BonusTaxMethod::Separate, BonusTaxMethod::Combined),
            ("\n", BonusTaxMethod::Separate, BonusTaxMethod::Separate),
            ("\n", BonusTaxMethod::Combined, BonusTaxMethod::Combined),
        ];

        for (answer, default, expected) in cases {
            let mut output: Vec<u8> = Vec::new();
            let mut prompter = Prompter::new(answer.as_bytes(), &mut output);

            assert_eq!(prompter.ask_method(default).unwrap(), expected, "answer {answer:?}");
        }
    }

    // =========================================================================
    // collect_profile tests
    // =========================================================================

    #[test]
    fn all_empty_answers_yield_defaults() {
        let (profile, text) = collect("\n\n\n\n\n\n\n");

        assert_eq!(profile, Profile::default());
        assert!(text.contains("Selected: bonus combined with comprehensive income"));
    }

    #[test]
    fn answers_fill_fields_in_order() {
        let (profile, _) = collect("35000\n120000\n26421\n3000\n10000\n0.07\n2\n");

        assert_eq!(profile.monthly_salary, dec!(35000));
        assert_eq!(profile.annual_bonus, dec!(120000));
        assert_eq!(profile.social_insurance_base, dec!(26421));
        assert_eq!(profile.special_deduction, dec!(3000));
        assert_eq!(profile.employer_fund_base, dec!(10000));
        assert_eq!(profile.fund_rate, dec!(0.07));
        assert_eq!(profile.bonus_tax_method, BonusTaxMethod::Separate);
    }

    #[test]
    fn unasked_fields_are_carried_over() {
        let defaults = Profile {
            other_deductions: dec!(400),
            social_insurance_rate: dec!(0.105),
            ..Profile::default()
        };
        let mut output: Vec<u8> = Vec::new();

        let profile = collect_profile("".as_bytes(), &mut output, &defaults).unwrap();

        assert_eq!(profile, defaults);
    }
}
