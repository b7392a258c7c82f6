#![no_main]
use libfuzzer_sys::fuzz_target;

use avl_set::model::{run_set_ops_equivalence, SetOpsInput};

fuzz_target!(|input: SetOpsInput| { run_set_ops_equivalence(input) });
