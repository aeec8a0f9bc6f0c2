//! Harness generator: emits the delimited driver region for one class and its tests.
//!
//! The region is built entirely from profile statement hooks, so every language shares one emission order:
//! markers and banner, preamble, the per-test caller function, the driver with one block per test, the optional
//! problem statement dump and the closing marker.

use kawigi_core::markers::{self, RUNNER_NAME, value_var};
use kawigi_core::{DOUBLE_TOLERANCE, DataType};

use super::writer::CodeWriter;
use crate::codec;
use crate::problem::{ClassDecl, Test};
use crate::profile::{LanguageProfile, Part, Target, indent_unit};
use crate::version;

const OBJECT_VAR: &str = "obj";
const ANSWER_VAR: &str = "answer";
const RESULT_VAR: &str = "res";
const START_VAR: &str = "startTime";
const END_VAR: &str = "endTime";
const TEST_NUM_VAR: &str = "testNum";
const HAS_ANSWER_VAR: &str = "hasAnswer";
const INDEX_VAR: &str = "i";
const ALL_RIGHT_VAR: &str = "all_right";
const DISABLED_VAR: &str = "disabled";
const ANY_DISABLED_VAR: &str = "tests_disabled";

/// Measured durations at or above this many seconds fail the test.
const TIMEOUT_SECONDS: u32 = 2;

/// Generate the driver region for `class`, starting at column zero.
pub fn generate_harness(class: &ClassDecl, target: Target<'_>) -> String {
    generate_region(class, target, "")
}

/// Generate the driver region with every line prefixed by `base`.
#[tracing::instrument(skip_all, fields(class = %class.name, language = target.profile.name(), tests = class.test_count()))]
pub(crate) fn generate_region(class: &ClassDecl, target: Target<'_>, base: &str) -> String {
    let mut generator = HarnessGenerator {
        class,
        target,
        profile: target.profile,
        w: CodeWriter::new(base, indent_unit(target.profile, target.settings)),
    };
    generator.emit_region();
    generator.w.finish()
}

struct HarnessGenerator<'a> {
    class: &'a ClassDecl,
    target: Target<'a>,
    profile: &'a dyn LanguageProfile,
    w: CodeWriter,
}

impl HarnessGenerator<'_> {
    fn emit_region(&mut self) {
        self.comment(markers::BEGIN_REGION);
        self.comment(&version::banner());
        self.comment(markers::BEGIN_CUT);

        let preamble = self.profile.preamble(self.target.settings);
        if !preamble.is_empty() {
            for line in &preamble {
                self.w.writeln(line);
            }
            self.w.newline();
        }

        self.emit_caller();
        self.w.newline();
        self.emit_driver();

        self.comment(markers::END_CUT);
        self.emit_statement();
        self.comment(markers::END_REGION);
    }

    fn comment(&mut self, text: &str) {
        let line = format!("{} {text}", self.profile.comment());
        self.w.writeln(line.trim_end());
    }

    fn emit_statement(&mut self) {
        let class = self.class;
        let Some(statement) = class.statement.as_deref() else {
            return;
        };
        if !self.target.setting_bool("include-statement", false) {
            return;
        }
        for line in statement.lines() {
            self.comment(line);
        }
    }

    // ========================================
    // Block helpers
    // ========================================

    fn open(&mut self, line: String) {
        self.w.writeln(&line);
        self.w.indent();
    }

    /// Close the current branch and open the next one at the same level.
    fn branch(&mut self, line: String) {
        self.w.dedent();
        self.w.writeln(&line);
        self.w.indent();
    }

    fn close(&mut self, line: Option<String>) {
        self.w.dedent();
        self.w.writeln_opt(line);
    }

    fn print(&mut self, parts: &[Part<'_>], newline: bool) {
        let line = self.profile.print(parts, newline);
        self.w.writeln(&line);
    }

    fn print_text(&mut self, text: &str) {
        self.print(&[Part::Text(text)], true);
    }

    fn declare(&mut self, name: &str, type_name: &str) {
        let line = self.profile.declare(name, type_name);
        self.w.writeln_opt(line);
    }

    fn assign(&mut self, name: &str, expr: &str) {
        let line = self.profile.assign(name, expr);
        self.w.writeln(&line);
    }

    fn type_name(&self, ty: DataType) -> String {
        self.target.type_name(ty)
    }

    // ========================================
    // Caller function
    // ========================================

    fn emit_caller(&mut self) {
        let p = self.profile;
        let class = self.class;
        let method = &class.method;
        let answer_param = value_var(method.params.len());
        let bool_type = self.type_name(DataType::Boolean);

        let mut params = vec![(TEST_NUM_VAR.to_string(), self.type_name(DataType::Integer))];
        for (i, param) in method.params.iter().enumerate() {
            params.push((value_var(i), self.type_name(param.ty)));
        }
        params.push((HAS_ANSWER_VAR.to_string(), bool_type.clone()));
        params.push((answer_param.clone(), self.type_name(method.return_type)));
        self.open(p.function_open(RUNNER_NAME, &bool_type, &params));

        self.print(
            &[
                Part::Text("Test "),
                Part::Value(p.display(TEST_NUM_VAR, DataType::Integer)),
                Part::Text(": ["),
            ],
            false,
        );
        for (i, param) in method.params.iter().enumerate() {
            if i > 0 {
                self.print(&[Part::Text(",")], false);
            }
            self.emit_dump(&value_var(i), param.ty);
        }
        self.print_text("]");

        let call_args: Vec<String> = (0..method.params.len()).map(value_var).collect();
        let call = format!(
            "{OBJECT_VAR}{}{}({})",
            p.method_call_operator(),
            method.name,
            call_args.join(", ")
        );
        let line = p.declare_object(OBJECT_VAR, &class.name);
        self.w.writeln_opt(line);
        self.declare(ANSWER_VAR, &self.type_name(method.return_type));
        self.declare(START_VAR, p.time_type());
        self.declare(END_VAR, p.time_type());
        self.w.writeln(&p.construct(OBJECT_VAR, &class.name));
        self.w.writeln(&p.capture_time(START_VAR));
        self.assign(ANSWER_VAR, &call);
        self.w.writeln(&p.capture_time(END_VAR));
        let line = p.teardown(OBJECT_VAR);
        self.w.writeln_opt(line);

        self.declare(RESULT_VAR, &bool_type);
        self.assign(RESULT_VAR, p.bool_literal(true));

        let elapsed = p.elapsed_seconds(START_VAR, END_VAR);
        self.print(
            &[
                Part::Text("Time: "),
                Part::Value(p.display(&elapsed, DataType::Double)),
                Part::Text(" seconds"),
            ],
            true,
        );

        self.open(p.if_open(HAS_ANSWER_VAR));
        self.print_text("Desired answer:");
        self.print(&[Part::Text("\t")], false);
        self.emit_dump(&answer_param, method.return_type);
        self.print(&[], true);
        self.close(p.if_close());

        self.print_text("Your answer:");
        self.print(&[Part::Text("\t")], false);
        self.emit_dump(ANSWER_VAR, method.return_type);
        self.print(&[], true);

        self.open(p.if_open(HAS_ANSWER_VAR));
        self.emit_equality(ANSWER_VAR, &answer_param, method.return_type);
        self.close(p.if_close());

        self.open(p.if_open(&format!("{elapsed} >= {TIMEOUT_SECONDS}")));
        self.print_text("FAIL the timeout");
        self.assign(RESULT_VAR, p.bool_literal(false));
        self.branch(p.else_if(&p.not(RESULT_VAR)));
        self.print_text("DOESN'T MATCH!!!!");
        self.branch(p.else_if(HAS_ANSWER_VAR));
        self.print_text("Match :-)");
        self.branch(p.else_open());
        self.print_text("OK, but is it right?");
        self.close(p.if_close());

        self.print_text("");
        self.w.writeln(&p.return_stmt(RESULT_VAR));
        self.close(p.function_close());
    }

    /// Print a value without a trailing newline; arrays print as `{e1,e2,...}`.
    fn emit_dump(&mut self, var: &str, ty: DataType) {
        let p = self.profile;
        if ty.is_scalar() {
            self.print(&[Part::Value(p.display(var, ty))], false);
            return;
        }
        self.print(&[Part::Text("{")], false);
        self.open(p.loop_open(INDEX_VAR, &p.array_len(var)));
        self.open(p.if_open(&format!("{INDEX_VAR} > 0")));
        self.print(&[Part::Text(",")], false);
        self.close(p.if_close());
        self.print(&[Part::Value(p.display(&p.index(var, INDEX_VAR), ty.scalar()))], false);
        self.close(p.loop_close());
        self.print(&[Part::Text("}")], false);
    }

    fn emit_equality(&mut self, actual: &str, expected: &str, ty: DataType) {
        let p = self.profile;
        if ty.is_scalar() {
            let eq = self.scalar_equality(actual, expected, ty);
            self.assign(RESULT_VAR, &eq);
            return;
        }
        self.open(p.if_open(&p.not_equals(&p.array_len(actual), &p.array_len(expected))));
        self.assign(RESULT_VAR, p.bool_literal(false));
        self.branch(p.else_open());
        self.open(p.loop_open(INDEX_VAR, &p.array_len(actual)));
        let eq = self.scalar_equality(&p.index(actual, INDEX_VAR), &p.index(expected, INDEX_VAR), ty.scalar());
        self.open(p.if_open(&p.not(&eq)));
        self.assign(RESULT_VAR, p.bool_literal(false));
        self.w.writeln(&p.break_stmt());
        self.close(p.if_close());
        self.close(p.loop_close());
        self.close(p.if_close());
    }

    /// Doubles match when literally equal or within the relative tolerance of the expected value.
    fn scalar_equality(&self, actual: &str, expected: &str, scalar: DataType) -> String {
        let p = self.profile;
        if scalar != DataType::Double {
            return p.equals(actual, expected, scalar);
        }
        format!(
            "{} {} {abs}({expected} - {actual}) <= {DOUBLE_TOLERANCE:e} * {max}(1.0, {abs}({expected}))",
            p.equals(actual, expected, scalar),
            p.or_op(),
            abs = p.abs_fn(),
            max = p.max_fn(),
        )
    }

    // ========================================
    // Driver
    // ========================================

    fn emit_driver(&mut self) {
        let p = self.profile;
        let class = self.class;
        let method = &class.method;
        let bool_type = self.type_name(DataType::Boolean);

        self.open(p.main_open());
        self.declare(ALL_RIGHT_VAR, &bool_type);
        self.declare(DISABLED_VAR, &bool_type);
        self.declare(ANY_DISABLED_VAR, &bool_type);
        self.assign(ALL_RIGHT_VAR, p.bool_literal(true));
        self.assign(ANY_DISABLED_VAR, p.bool_literal(false));
        self.w.newline();

        let value_types: Vec<DataType> = method.param_types().chain([method.return_type]).collect();
        for (i, ty) in value_types.iter().enumerate() {
            let line = p.declare_with_default(&value_var(i), &self.type_name(*ty), *ty);
            self.w.writeln_opt(line);
        }
        self.w.newline();

        for (index, test) in class.tests().iter().enumerate() {
            if test.params.len() != method.params.len() {
                tracing::warn!(
                    test = index,
                    found = test.params.len(),
                    expected = method.params.len(),
                    "test does not match the method arity; not emitted"
                );
                continue;
            }
            self.emit_test(index, test, &value_types);
        }

        self.open(p.if_open(ALL_RIGHT_VAR));
        self.open(p.if_open(ANY_DISABLED_VAR));
        self.print_text("You're a stud (but some test cases were disabled)!");
        self.branch(p.else_open());
        self.print_text("You're a stud (at least on given cases)!");
        self.close(p.if_close());
        self.branch(p.else_open());
        self.print_text("Some of the test cases had errors.");
        self.close(p.if_close());

        let line = p.main_return();
        self.w.writeln_opt(line);
        self.close(p.main_close());
    }

    /// One test block: begin marker, value initialisers, the guarded call and the end sentinel.
    fn emit_test(&mut self, index: usize, test: &Test, value_types: &[DataType]) {
        let p = self.profile;
        let answer_index = value_types.len() - 1;

        self.w.writeln(&markers::begin_test_marker(p.comment(), index));
        self.assign(DISABLED_VAR, p.bool_literal(test.disabled));

        let values = test.params.iter().map(Some).chain([test.answer.as_ref()]);
        for (i, (value, ty)) in values.zip(value_types).enumerate() {
            let Some(value) = value else {
                continue;
            };
            let literal = codec::encode(value, *ty, self.target);
            let line = p.assign_value(&value_var(i), &literal, *ty);
            self.w.writeln(&line);
        }

        let mut args = vec![index.to_string()];
        args.extend((0..answer_index).map(value_var));
        args.push(p.bool_literal(test.answer.is_some()).to_string());
        args.push(value_var(answer_index));
        let call = format!("{RUNNER_NAME}({})", args.join(", "));
        self.assign(
            ALL_RIGHT_VAR,
            &format!("({DISABLED_VAR} {} {call} ) {} {ALL_RIGHT_VAR}", p.or_op(), p.and_op()),
        );
        self.assign(ANY_DISABLED_VAR, &format!("{ANY_DISABLED_VAR} {} {DISABLED_VAR}", p.or_op()));
        self.w.writeln(&p.end_test_sentinel());
        self.w.newline();
    }
}
