mod common;

use deftoml_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;

const SAMPLE: &str = "# sample\ndef width := 80\ndef half := #(/ width 2)\n\n@{\ncolumns = \
                      width;\nhalf = half;\ntitle = [[Main window]];\n}\n\n@{\nletter = 1;\n}\n";

#[test]
fn converts_file_to_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("window.conf");
	std::fs::write(&input, SAMPLE)?;

	common::deftoml_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::starts_with("\n[dict1]"))
		.stdout(predicates::str::contains("columns = 80"))
		.stdout(predicates::str::contains("half = 40.0"))
		.stdout(predicates::str::contains("title = \"Main window\""))
		.stdout(predicates::str::contains("[dict2]"));

	Ok(())
}

#[test]
fn converts_file_to_json() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("window.conf");
	std::fs::write(&input, SAMPLE)?;

	common::deftoml_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("--format")
		.arg("json")
		.assert()
		.success()
		.stdout(predicates::str::contains("\"dict1\": {"))
		.stdout(predicates::str::contains("\"title\": \"Main window\""));

	Ok(())
}

#[rstest]
#[case::unexpected_line("key = 1;\n", "Syntax Error: Unexpected line: key = 1;")]
#[case::nested_block("@{\n@{\n}\n", "Syntax Error: Nested dictionaries are not allowed.")]
#[case::missing_semicolon("@{\nkey = 1\n}\n", "Syntax Error: Invalid key-value pair: key = 1")]
#[case::invalid_value("@{\nkey = nope;\n}\n", "Syntax Error: Invalid value: nope")]
#[case::unknown_operand("def x := #(+ y 1)\n", "Syntax Error: Unknown variable or value: y")]
#[case::division_by_zero("def x := #(/ 1 0)\n", "Unexpected error: division by zero")]
fn failures_are_reported_on_stdout_with_zero_exit(
	#[case] source: &str,
	#[case] message: &str,
) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("broken.conf");
	std::fs::write(&input, source)?;

	common::deftoml_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.assert()
		.code(0)
		.stdout(predicates::str::diff(format!("{message}\n")));

	Ok(())
}

#[test]
fn missing_input_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::deftoml_cmd()
		.current_dir(tmp.path())
		.arg("missing.conf")
		.assert()
		.code(0)
		.stdout(predicates::str::diff("Error: Input file not found.\n"));

	Ok(())
}

#[rstest]
#[case::syntax("key = 1;\n", 1)]
#[case::unexpected("def x := #(/ 0)\n", 3)]
fn exit_code_flag_distinguishes_failures(
	#[case] source: &str,
	#[case] code: i32,
) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("broken.conf");
	std::fs::write(&input, source)?;

	common::deftoml_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("--exit-code")
		.assert()
		.code(code);

	Ok(())
}

#[test]
fn exit_code_flag_for_missing_input() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::deftoml_cmd()
		.current_dir(tmp.path())
		.arg("missing.conf")
		.arg("--exit-code")
		.assert()
		.code(2)
		.stdout(predicates::str::contains("Error: Input file not found."));

	Ok(())
}

#[test]
fn unclosed_block_is_discarded_with_warning() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("unclosed.conf");
	std::fs::write(&input, "@{\nkept = 1;\n}\n@{\nlost = 2;\n")?;

	common::deftoml_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::contains("kept = 1"))
		.stdout(predicates::str::contains("lost").not())
		.stderr(predicates::str::contains("never closed"));

	Ok(())
}

#[test]
fn strict_flag_rejects_unclosed_block() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("unclosed.conf");
	std::fs::write(&input, "@{\nlost = 2;\n")?;

	common::deftoml_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("--strict")
		.assert()
		.success()
		.stdout(predicates::str::diff(
			"Syntax Error: Unclosed dictionary opened on line 1.\n",
		));

	Ok(())
}

#[test]
fn verbose_writes_report_to_stderr() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("broken.conf");
	std::fs::write(&input, "key = 1;\n")?;

	common::deftoml_cmd()
		.current_dir(tmp.path())
		.arg(&input)
		.arg("--verbose")
		.assert()
		.success()
		.stderr(predicates::str::contains("deftoml::unexpected_line"));

	Ok(())
}

#[rstest]
#[case::verbose_enables_debug(None, true)]
#[case::rust_log_takes_precedence(Some("error"), false)]
fn log_filter_resolution(
	#[case] rust_log: Option<&str>,
	#[case] shows_debug: bool,
) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("sample.conf");
	std::fs::write(&input, SAMPLE)?;

	let mut cmd = common::deftoml_cmd();
	if let Some(filter) = rust_log {
		cmd.env("RUST_LOG", filter);
	}

	let assert = cmd.current_dir(tmp.path()).arg(&input).arg("--verbose").assert().success();
	let debug_line = predicates::str::contains("defined constant");
	if shows_debug {
		assert.stderr(debug_line);
	} else {
		assert.stderr(debug_line.not());
	}

	Ok(())
}
