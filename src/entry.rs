use clap::Parser;
use tracing::{debug, info};

use crate::args::{
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, HttpMethod, ProbeArgs,
};
use crate::config::{PlanFile, load_plan};
use crate::error::{AppError, AppResult, ValidationError};
use crate::probe::{ProbeDescriptor, ProbeRunner, RunnerSettings, default_plan};

struct RunPlan {
    settings: RunnerSettings,
    descriptors: Vec<ProbeDescriptor>,
    output: Option<String>,
}

pub(crate) fn run() -> AppResult<()> {
    let args = ProbeArgs::parse();

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(args: ProbeArgs) -> AppResult<()> {
    let plan = build_plan(args)?;
    let runner = ProbeRunner::new(&plan.settings)?;
    let log = runner.run(&plan.descriptors).await?;

    let report = crate::report::render(&log)?;
    println!("{report}");
    if let Some(path) = plan.output.as_deref() {
        crate::report::write_report(path, &report)?;
        info!("Report written to {}", path);
    }
    Ok(())
}

fn build_plan(args: ProbeArgs) -> AppResult<RunPlan> {
    if args.data.is_some() && args.path.is_none() {
        return Err(AppError::validation(ValidationError::DataRequiresPath));
    }
    if args.method.is_some() && args.path.is_none() {
        return Err(AppError::validation(ValidationError::MethodRequiresPath));
    }
    if args.path.is_some() && args.plan.is_some() {
        return Err(AppError::validation(ValidationError::PathWithPlanFile));
    }

    // One-off probes skip the default plan files as well.
    let plan_file = if args.path.is_some() {
        None
    } else {
        load_plan(args.plan.as_deref())?
    };

    let settings = build_settings(&args, plan_file.as_ref())?;

    let descriptors = match (&args.path, plan_file.as_ref()) {
        (Some(path), _) => vec![ProbeDescriptor {
            method: args.method.unwrap_or(HttpMethod::Get),
            endpoint: path.clone(),
            body: args.data.clone(),
        }],
        (None, Some(plan)) => plan.descriptors()?,
        (None, None) => default_plan(),
    };

    debug!(
        probes = descriptors.len(),
        base_url = %settings.base_url,
        "run plan resolved"
    );

    Ok(RunPlan {
        settings,
        descriptors,
        output: args.output,
    })
}

fn build_settings(args: &ProbeArgs, plan: Option<&PlanFile>) -> AppResult<RunnerSettings> {
    let base_url = args
        .base_url
        .clone()
        .or_else(|| plan.and_then(|file| file.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

    let mut headers = match plan {
        Some(file) => file.parsed_headers()?,
        None => Vec::new(),
    };
    headers.extend(args.headers.iter().cloned());

    let request_timeout = match (args.request_timeout, plan.and_then(|file| file.timeout.as_ref()))
    {
        (Some(timeout), _) => timeout,
        (None, Some(value)) => value.to_duration()?,
        (None, None) => DEFAULT_REQUEST_TIMEOUT,
    };
    let connect_timeout = match (
        args.connect_timeout,
        plan.and_then(|file| file.connect_timeout.as_ref()),
    ) {
        (Some(timeout), _) => timeout,
        (None, Some(value)) => value.to_duration()?,
        (None, None) => DEFAULT_CONNECT_TIMEOUT,
    };

    Ok(RunnerSettings {
        base_url,
        headers,
        request_timeout,
        connect_timeout,
    })
}
