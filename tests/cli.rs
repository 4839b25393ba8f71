//! End-to-end CLI tests over fixture files.

use assert_cmd::Command;
use predicates::prelude::*;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/positions.html");

fn bin() -> Command {
    Command::cargo_bin("oa-positions").expect("binary should build")
}

#[test]
fn positions_default_tsv() {
    let output = bin().arg("positions").arg(FIXTURE).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "header + two rows, canceled row skipped");
    assert_eq!(
        lines[0],
        "tradeno\tbot\tsym\texp\tstrat\tpostext\tstatus\tclosedate\tqty\tcost\tcostdesc\tpnl"
    );
    assert_eq!(
        lines[1],
        "1\tWheelhouse 9\tSPY\tOct 20\tPut Credit Spread\t-3 450/445 PCS\tClosed\t10/18/2023 2:15pm\t3\t1500\tcredit\t1234.5"
    );
    assert_eq!(
        lines[2],
        "2\tWheelhouse 9\tIWM\tNov 17\tIron Condor\t-1 180/185/195/200 IC\tExpired\t11/17/2023 4:00pm\t1\t250\tcredit\t0"
    );
}

#[test]
fn positions_csv_with_fees() {
    let output = bin()
        .args(["positions", "--csv", "--fee-cents", "45"])
        .arg(FIXTURE)
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].ends_with(",pnl,fees,netpnl"));
    assert!(lines[1].ends_with(",1234.5,-5.40,1229.10"), "{}", lines[1]);
    assert!(lines[2].ends_with(",0,-1.80,-1.80"), "{}", lines[2]);
}

#[test]
fn positions_include_canceled() {
    let output = bin()
        .args(["positions", "--include-canceled"])
        .arg(FIXTURE)
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[3].starts_with("3\tWheelhouse 9\tQQQ\t"));
    assert!(lines[3].contains("\tCanceled\t"));
    assert!(lines[3].ends_with("\t0"), "canceled row has zero pnl");
}

#[test]
fn positions_config_file_sets_fee_rate() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("options.yaml");
    std::fs::write(&cfg, "fee_cents: 45\n").unwrap();

    let output = bin()
        .args(["positions", "--config"])
        .arg(&cfg)
        .arg(FIXTURE)
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(stdout.lines().next().unwrap().ends_with("\tfees\tnetpnl"));
}

#[test]
fn positions_missing_panel_fails_loudly() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("empty.html");
    std::fs::write(&page, "<html><body><p>nothing here</p></body></html>").unwrap();

    bin()
        .arg("positions")
        .arg(&page)
        .assert()
        .failure()
        .stderr(predicate::str::contains("closed positions panel not found"));
}

#[test]
fn positions_missing_file_fails() {
    bin()
        .args(["positions", "no-such-file.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-file.html"));
}

#[test]
fn winrate_groups_by_type() {
    let dir = tempfile::tempdir().unwrap();
    let trades = dir.path().join("trades.csv");
    std::fs::write(
        &trades,
        "type,openDate,closeDate,daysInTrade,pnl\n\
         A,2023-01-01,2023-01-05,4,10\n\
         A,2023-01-02,2023-01-03,1,-5\n\
         A,2023-01-04,2023-01-10,6,20\n\
         B,2023-02-01,2023-02-02,1,-1\n\
         B,2023-02-03,2023-02-04,1,-1\n",
    )
    .unwrap();

    let output = bin().arg("winrate").arg(&trades).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        "type\twins\tnum_trades\tavg_daysInTrade\tmin_trade_date\tmax_trade_date\tavg_PnL\tsum_PnL\twin_rate"
    );
    assert_eq!(
        lines[1],
        "A\t2\t3\t3.67\t2023-01-01\t2023-01-10\t8.33\t25.00\t0.667"
    );
    assert_eq!(
        lines[2],
        "B\t0\t2\t1.00\t2023-02-01\t2023-02-04\t-1.00\t-2.00\t0.000"
    );
}
