use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "2", "--max-turns", "400"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert!(v["turns"].is_u64());
    assert!(v["player1"]["orders"].is_u64());
    if v["finished"] == true && !v["winner"].is_null() {
        assert!(v["winner"].is_string());
    }
}
