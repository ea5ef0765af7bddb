use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{anyhow, Context};
use log::{debug, info, warn};

use crate::{count_sheep, Config, Outcome};

/// Prints every multiple of `number` until all digits have been seen.
/// With `verbose`, each line also carries the digits accumulated so far.
pub fn run_single<W: Write>(
    out: &mut W,
    number: u64,
    verbose: bool,
    config: &Config,
) -> anyhow::Result<Outcome> {
    debug!("Single mode for {number} (verbose: {verbose})");

    if number == 0 {
        writeln!(out, "{}", Outcome::Insomnia)?;
        return Ok(Outcome::Insomnia);
    }

    for step in config.scan(number) {
        if verbose {
            writeln!(out, "{} {}   {}", step.multiplier, step.product, step.seen)?;
        } else {
            writeln!(out, "{} {}", step.multiplier, step.product)?;
        }

        if step.is_covering() {
            return Ok(Outcome::Found {
                multiplier: step.multiplier,
                product: step.product,
            });
        }
    }

    let outcome = Outcome::NotFound {
        max_multiplier: config.max_multiplier(),
    };
    warn!(
        "{number} not covered within {} multiples",
        config.max_multiplier()
    );
    writeln!(out, "{outcome}")?;
    Ok(outcome)
}

/// Reads a case count followed by one number per line and prints
/// `Case #k: <result>` for each. Lines past the declared count are never parsed.
///
/// Returns the number of cases processed.
pub fn run_batch<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    config: &Config,
) -> anyhow::Result<usize> {
    let mut lines = input.lines();
    let count_line = lines
        .next()
        .ok_or_else(|| anyhow!("Input is empty, expected a case count on the first line"))?
        .context("Failed to read case count")?;
    let count: usize = parse_line(&count_line, 1)?;
    debug!("Batch mode with {count} declared cases");

    let mut case = 0;
    for (index, line) in lines.enumerate() {
        case += 1;
        if case > count {
            warn!("Input has more than {count} cases, ignoring the rest");
            case = count;
            break;
        }

        let line_number = index + 2;
        let line = line.with_context(|| format!("Failed to read line {line_number}"))?;
        let number: u64 = parse_line(&line, line_number)?;

        let outcome = count_sheep(number, config);
        debug!("Case #{case}: {number} -> {outcome:?}");
        writeln!(out, "Case #{case}: {outcome}")?;
    }

    if case < count {
        warn!("Input ended after {case} of {count} declared cases");
    }
    info!("Processed {case} cases");

    Ok(case)
}

fn parse_line<T>(line: &str, line_number: usize) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    line.trim().parse().with_context(|| {
        format!("Line {line_number}: expected a non-negative integer, got {line:?}")
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    fn batch(input: &str, config: &Config) -> anyhow::Result<(usize, String)> {
        let mut out = Vec::new();
        let cases = run_batch(input.as_bytes(), &mut out, config)?;
        Ok((cases, String::from_utf8(out).unwrap()))
    }

    fn single(number: u64, verbose: bool, config: &Config) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = run_single(&mut out, number, verbose, config).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn batch_reports_each_case() {
        let (cases, out) = batch("2\n0\n25\n", &Config::default()).unwrap();

        assert_eq!(cases, 2);
        assert_eq!(out, "Case #1: INSOMNIA\nCase #2: 900\n");
    }

    #[test]
    fn batch_code_jam_sample() {
        let (_, out) = batch("5\n0\n1\n2\n11\n1692\n", &Config::default()).unwrap();

        assert_eq!(
            out,
            "Case #1: INSOMNIA\nCase #2: 10\nCase #3: 90\nCase #4: 110\nCase #5: 5076\n"
        );
    }

    #[test]
    fn batch_stops_after_declared_count() {
        let (cases, out) = batch("1\n7\nnot a number\n3\n", &Config::default()).unwrap();

        assert_eq!(cases, 1);
        assert_eq!(out, "Case #1: 70\n");
    }

    #[test]
    fn batch_zero_count_processes_nothing() {
        let (cases, out) = batch("0\n5\n", &Config::default()).unwrap();

        assert_eq!(cases, 0);
        assert_eq!(out, "");
    }

    #[test]
    fn batch_short_input() {
        let (cases, out) = batch("3\n2\n", &Config::default()).unwrap();

        assert_eq!(cases, 1);
        assert_eq!(out, "Case #1: 90\n");
    }

    #[test]
    fn batch_trims_whitespace() {
        let (_, out) = batch(" 1 \r\n  25\t\n", &Config::default()).unwrap();
        assert_eq!(out, "Case #1: 900\n");
    }

    #[test]
    fn batch_reports_not_found() {
        let config = Config::new(10).unwrap();
        let (_, out) = batch("2\n125\n1\n", &config).unwrap();

        assert_eq!(out, "Case #1: NOT FOUND\nCase #2: 10\n");
    }

    #[test_case("", "Input is empty" ; "empty input")]
    #[test_case("two\n", "Line 1" ; "bad count")]
    #[test_case("2\n4\n-3\n", "Line 3" ; "negative number")]
    #[test_case("1\n1.5\n", "Line 2" ; "fraction")]
    fn batch_rejects_malformed_input(input: &str, message: &str) {
        let err = batch(input, &Config::default()).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn single_prints_steps_until_covered() {
        let (outcome, out) = single(1692, false, &Config::default());

        assert_eq!(
            outcome,
            Outcome::Found {
                multiplier: 3,
                product: 5076
            }
        );
        assert_eq!(out, "1 1692\n2 3384\n3 5076\n");
    }

    #[test]
    fn single_verbose_prints_seen_digits() {
        let (_, out) = single(1692, true, &Config::default());

        assert_eq!(
            out,
            "1 1692   {1, 2, 6, 9}\n\
             2 3384   {1, 2, 3, 4, 6, 8, 9}\n\
             3 5076   {0, 1, 2, 3, 4, 5, 6, 7, 8, 9}\n"
        );
    }

    #[test_case(false ; "quiet")]
    #[test_case(true ; "verbose")]
    fn single_zero_is_insomnia(verbose: bool) {
        let (outcome, out) = single(0, verbose, &Config::default());

        assert_eq!(outcome, Outcome::Insomnia);
        assert_eq!(out, "INSOMNIA\n");
    }

    #[test]
    fn single_reports_not_found() {
        let config = Config::new(2).unwrap();
        let (outcome, out) = single(1, false, &config);

        assert_eq!(outcome, Outcome::NotFound { max_multiplier: 2 });
        assert_eq!(out, "1 1\n2 2\nNOT FOUND\n");
    }

    #[test]
    fn single_ten_steps_for_one() {
        let (_, out) = single(1, false, &Config::default());
        let last = out.lines().last().unwrap();

        assert_eq!(out.lines().count(), 10);
        assert_eq!(last, "10 10");
    }
}
