use hdroute::{
    driver::{read_batch_from, write_report},
    instance::parse_batch,
    units::Rate,
    Config, NodeId,
};

fn run_text(input: &str) -> anyhow::Result<String> {
    let instances = read_batch_from(input.as_bytes())?;
    let cfg = Config::default();
    let report = hdroute::run(&cfg, &instances);
    let mut out = Vec::new();
    write_report(&cfg, &report, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn line_graph_single_demand() -> anyhow::Result<()> {
    let out = run_text("1\n3 2 1\n0 1 10\n1 2 10\n0 2\n")?;
    assert_eq!(out, "2\n0 1\n1 2\n10.000000 3 0 1 2\n10.000000\n10.000000\n");
    Ok(())
}

#[test]
fn second_identical_demand_fails() -> anyhow::Result<()> {
    let out = run_text("1\n3 2 2\n0 1 10\n1 2 10\n0 2\n0 2\n")?;
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[3], "10.000000 3 0 1 2");
    assert_eq!(lines[4], "0 0");
    assert_eq!(lines[5], "10.000000");
    Ok(())
}

#[test]
fn disconnected_destination() -> anyhow::Result<()> {
    let out = run_text("1\n3 1 1\n0 1 10\n0 2\n")?;
    assert_eq!(out, "0\n0 0\n0.000000\n0.000000\n");
    Ok(())
}

// Two relays between a ground pair; once the first relay chain is busy the second demand has to
// find disjoint radios.
#[test]
fn disjoint_relays() -> anyhow::Result<()> {
    let input = "1\n6 5 2\n0 1 8\n1 2 6\n3 4 5\n4 5 9\n1 4 2\n0 2\n3 5\n";
    let instances = parse_batch(input)?;
    let report = hdroute::allocate(&instances[0]);
    assert_eq!(report.outcomes[0].rate(), Rate::new(6.0));
    assert_eq!(report.outcomes[1].rate(), Rate::new(5.0));
    assert_eq!(
        report.outcomes[1].path(),
        &[NodeId::new(3), NodeId::new(4), NodeId::new(5)]
    );
    assert_eq!(report.total, Rate::new(11.0));
    Ok(())
}

#[test]
fn replay_is_identical() -> anyhow::Result<()> {
    let mut input = String::from("3\n");
    for k in 0..3 {
        let n = 8;
        input.push_str(&format!("{n} {} {}\n", n, n));
        for u in 0..n {
            let v = (u + 1 + k) % n;
            input.push_str(&format!("{u} {v} {}.{}\n", u + 1, k * 25));
        }
        for s in 0..n {
            input.push_str(&format!("{s} {}\n", (s * 3 + 1) % n));
        }
    }
    let first = run_text(&input)?;
    let second = run_text(&input)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn malformed_input_names_field() {
    let err = read_batch_from("1\n3 1 1\n0 1 ten\n0 2\n".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("link capacity"));
}
