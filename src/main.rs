use anyhow::{Context, Result, bail};
use cpu_sched_model::{
    Algorithm, Process, ProcessTable, RoundRobinVariant, Sim, SimConfig, Summary,
    WorkloadConfig, report, sim::bernoulli_workload,
};
use std::num::NonZeroU64;

const USAGE: &str = "usage: cpu-sched [POLICY|all] [-q QUANTUM] [--queue] [-v] [--seed N] \
                     [ARRIVAL,BURST[,PRIORITY] ...]";

struct Args {
    algorithms: Vec<Algorithm>,
    config: SimConfig,
    workload: WorkloadConfig,
    specs: Vec<String>,
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args(std::env::args().skip(1))?;
    let processes = load_processes(&args)?;
    for process in &processes {
        println!("{process}");
    }

    let mut sim = Sim::new(args.config);
    for algorithm in args.algorithms {
        let schedule = sim
            .run(algorithm, &processes)
            .with_context(|| format!("{algorithm} failed"))?;

        println!("\n== {algorithm} ==");
        if args.verbose {
            for record in &schedule.events {
                println!("t={} {:?}", record.at, record.event);
            }
        }

        let summary = Summary::of(&schedule);
        println!("{}", report::render_results(&schedule));
        println!(
            "Makespan: {} ticks ({} idle, {:.0}% busy)",
            summary.makespan,
            summary.idle_ticks,
            summary.cpu_utilization * 100.0
        );
        println!("{}", report::render_gantt(algorithm.name(), &schedule.timeline));
    }

    Ok(())
}

fn load_processes(args: &Args) -> Result<Vec<Process>> {
    if args.specs.is_empty() {
        return Ok(bernoulli_workload(&args.workload));
    }

    let mut table = ProcessTable::new();
    for spec in &args.specs {
        // A bad entry only drops itself
        if let Err(err) = table.add_spec(spec) {
            eprintln!("skipping {spec:?}: {err}");
        }
    }
    if table.is_empty() {
        bail!("no valid processes given");
    }
    Ok(table.processes().to_vec())
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args {
        algorithms: Algorithm::ALL.to_vec(),
        config: SimConfig::default(),
        workload: WorkloadConfig::default(),
        specs: Vec::new(),
        verbose: false,
    };
    let mut policy_given = false;

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            "-q" | "--quantum" => {
                let value = argv.next().context("-q needs a value")?;
                let quantum: u64 = value
                    .parse()
                    .with_context(|| format!("bad quantum {value:?}"))?;
                args.config.quantum = NonZeroU64::new(quantum);
            }
            "--seed" => {
                let value = argv.next().context("--seed needs a value")?;
                args.workload.seed = value
                    .parse()
                    .with_context(|| format!("bad seed {value:?}"))?;
            }
            "--queue" => args.config.round_robin = RoundRobinVariant::ReadyQueue,
            "-v" | "--verbose" => args.verbose = true,
            spec if spec.contains(',') => args.specs.push(spec.to_owned()),
            "all" if !policy_given => policy_given = true,
            name if !policy_given => {
                args.algorithms = vec![name.parse()?];
                policy_given = true;
            }
            other => bail!("unexpected argument {other:?}\n{USAGE}"),
        }
    }

    Ok(args)
}
