use std::fs;
use std::process::Command;

fn sample() -> Vec<u8> {
    let mut data = b"LZ2 sample asset ".to_vec();
    data.extend([0u8; 64]);
    data.extend(0u8..32);
    data.extend(b"LZ2 sample asset ");
    data
}

#[test]
fn compress_roundtrip_cli() {
    let exe = env!("CARGO_BIN_EXE_lz2");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.bin");
    let compressed = dir.path().join("input.lz2");
    let output = dir.path().join("output.bin");
    fs::write(&input, sample()).unwrap();

    let status = Command::new(exe)
        .args([
            "compress",
            input.to_str().unwrap(),
            compressed.to_str().unwrap(),
            "--format",
            "overworld",
            "--strategy",
            "greedy",
        ])
        .status()
        .expect("compress failed");
    assert!(status.success());

    let status = Command::new(exe)
        .args([
            "decompress",
            compressed.to_str().unwrap(),
            output.to_str().unwrap(),
            "--format",
            "overworld",
        ])
        .status()
        .expect("decompress failed");
    assert!(status.success());

    assert_eq!(fs::read(&output).unwrap(), sample());
}

#[test]
fn compress_json_report() {
    let exe = env!("CARGO_BIN_EXE_lz2");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.bin");
    let compressed = dir.path().join("input.lz2");
    fs::write(&input, sample()).unwrap();

    let out = Command::new(exe)
        .args([
            "compress",
            input.to_str().unwrap(),
            compressed.to_str().unwrap(),
            "--json",
            "--dry-run",
        ])
        .output()
        .expect("compress failed");
    assert!(out.status.success());
    assert!(!compressed.exists());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["stats"]["input_bytes"], sample().len());
    assert!(report["stats"]["pieces"].as_u64().unwrap() > 0);
}

#[test]
fn inspect_writes_csv() {
    let exe = env!("CARGO_BIN_EXE_lz2");
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("fill.lz2");
    let csv_path = dir.path().join("pieces.csv");
    fs::write(&packed, lz2::compress(&[7u8; 40]).unwrap()).unwrap();

    let status = Command::new(exe)
        .args([
            "inspect",
            packed.to_str().unwrap(),
            "--csv",
            csv_path.to_str().unwrap(),
        ])
        .status()
        .expect("inspect failed");
    assert!(status.success());

    let text = fs::read_to_string(&csv_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("index,start,kind,length,encoded_len,argument")
    );
    assert_eq!(lines.next(), Some("0,0,byte-fill,40,3,07"));
    assert_eq!(lines.next(), None);
}

#[test]
fn malformed_input_exits_nonzero() {
    let exe = env!("CARGO_BIN_EXE_lz2");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.lz2");
    let output = dir.path().join("out.bin");
    fs::write(&input, [0xA0u8, 0x00]).unwrap();

    let out = Command::new(exe)
        .args(["decompress", input.to_str().unwrap(), output.to_str().unwrap()])
        .output()
        .expect("decompress failed to launch");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("malformed stream"));
    assert!(!output.exists());
}
