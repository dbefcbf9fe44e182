#![no_main]

use libfuzzer_sys::fuzz_target;
use sleight::replay::{parse_script, validate_script, ScriptRunner};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(script) = parse_script(text) else {
        return;
    };
    if validate_script(&script).is_ok() {
        // Every step that validates must also replay.
        ScriptRunner::new()
            .run(&script)
            .expect("validated script failed to replay");
    }
});
