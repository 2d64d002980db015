use std::fs;
use std::sync::{mpsc, Arc};

use anyhow::{bail, Context, Result};
use jobsaver_core::{
    update_options, update_popup, OptionsMsg, OptionsState, PopupMsg, PopupPhase, PopupState,
    Toast, SAVE_JOB_COMMAND,
};
use jobsaver_engine::{
    ApiClient, ApiSettings, ChannelToastSink, ContentScript, EngineCommand, EngineEvent,
    EngineHandle, EngineServices, FileConfigStore, LocalTab, PageContext, ReqwestApiClient,
    SaveOutcome, ShortcutSaveHandler, SiteRegistry,
};
use jobsaver_logging::{saver_info, saver_warn};

use crate::cli::{Command, PageArgs, Params};
use crate::effects::{options_msg, popup_msg, EffectRunner};

pub fn run(params: Params) -> Result<()> {
    let settings = match &params.api_url {
        Some(url) => ApiSettings::with_base_url(url.clone()),
        None => ApiSettings::from_env(),
    };
    saver_info!("Using API at {}", settings.base_url);
    let api: Arc<dyn ApiClient> = Arc::new(ReqwestApiClient::new(settings));
    let config = Arc::new(FileConfigStore::new(&params.config_dir));
    saver_info!("Config file {}", config.path().display());

    let (toast_tx, toast_rx) = mpsc::channel::<Toast>();
    let tab = match &params.page.page_url {
        Some(_) => {
            let page = load_page(&params.page)?;
            let toasts = Arc::new(ChannelToastSink::new(toast_tx));
            let saver = ShortcutSaveHandler::new(api.clone(), toasts);
            let script = ContentScript::new(page, Arc::new(SiteRegistry::default()), saver);
            LocalTab::new(script)
        }
        None => LocalTab::detached(),
    };

    let engine = EngineHandle::new(EngineServices {
        config,
        api,
        tab: Arc::new(tab),
    })
    .context("failed to start the engine")?;
    let mut runner = EffectRunner::new(engine, toast_rx);

    match params.command {
        Command::Scrape => scrape(&mut runner),
        Command::Shortcut => shortcut(&mut runner),
        Command::Popup => popup(&mut runner, &params),
        Command::Options => options(&mut runner, &params),
    }
}

fn load_page(args: &PageArgs) -> Result<PageContext> {
    let (Some(url), Some(html)) = (&args.page_url, &args.html) else {
        bail!("--page-url and --html are required for this command");
    };
    let bytes = fs::read(html).with_context(|| format!("reading {}", html.display()))?;
    PageContext::from_bytes(url, &bytes, args.content_type.as_deref())
        .with_context(|| format!("loading page {url}"))
}

fn scrape(runner: &mut EffectRunner) -> Result<()> {
    runner.submit(EngineCommand::ScrapeActiveTab);
    match runner.next_event() {
        Some(EngineEvent::PageScraped(Ok(record))) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Some(EngineEvent::PageScraped(Err(err))) => bail!("Page not supported: {err}"),
        other => bail!("unexpected engine reply: {other:?}"),
    }
}

fn shortcut(runner: &mut EffectRunner) -> Result<()> {
    runner.submit(EngineCommand::Shortcut(SAVE_JOB_COMMAND.to_string()));
    let report = match runner.next_event() {
        Some(EngineEvent::ShortcutHandled(Some(report))) => report,
        other => bail!("unexpected engine reply: {other:?}"),
    };
    runner.flush_toasts();
    for failure in &report.failures {
        saver_warn!("Shortcut: {}", failure);
    }
    match report.outcome {
        Some(SaveOutcome::Saved { .. }) => Ok(()),
        Some(outcome) => bail!("job not saved: {outcome:?}"),
        None => bail!("the page never answered the save request"),
    }
}

fn settle_popup(mut state: PopupState, runner: &mut EffectRunner) -> PopupState {
    while let Some(event) = runner.next_event() {
        if let Some(msg) = popup_msg(event) {
            let (next, effects) = update_popup(state, msg);
            state = next;
            runner.run(effects);
        }
    }
    state
}

fn popup(runner: &mut EffectRunner, params: &Params) -> Result<()> {
    let (state, effects) = update_popup(PopupState::new(), PopupMsg::Opened);
    runner.run(effects);
    let mut state = settle_popup(state, runner);

    for (field, value) in &params.edits {
        let (next, effects) = update_popup(
            state,
            PopupMsg::FieldChanged {
                field: *field,
                value: value.clone(),
            },
        );
        state = next;
        runner.run(effects);
    }

    let view = state.view();
    println!("Company: {}", view.form.company);
    println!("Role:    {}", view.form.role);
    println!("URL:     {}", view.form.url);
    let missing: Vec<&str> = view
        .form
        .missing_fields()
        .into_iter()
        .map(|field| field.label())
        .collect();
    if view.submit_disabled || !missing.is_empty() {
        for error in &view.errors {
            println!("[error] {error}");
        }
        if !missing.is_empty() {
            println!("[error] Missing: {}", missing.join(", "));
        }
        bail!("the job cannot be saved yet");
    }

    let (state, effects) = update_popup(state, PopupMsg::Submitted);
    if effects.is_empty() {
        bail!("the job cannot be saved yet");
    }
    runner.run(effects);
    let state = settle_popup(state, runner);
    if state.phase() == PopupPhase::Saving {
        bail!("no answer from the API");
    }
    if let Some(error) = runner.take_errors().pop() {
        bail!("job not saved: {error}");
    }
    Ok(())
}

fn settle_options(mut state: OptionsState, runner: &mut EffectRunner) -> OptionsState {
    while let Some(event) = runner.next_event() {
        if let Some(msg) = options_msg(event) {
            let (next, effects) = update_options(state, msg);
            state = next;
            runner.run(effects);
        }
    }
    state
}

fn step_options(state: OptionsState, msg: OptionsMsg, runner: &mut EffectRunner) -> OptionsState {
    let (state, effects) = update_options(state, msg);
    runner.run(effects);
    settle_options(state, runner)
}

fn options(runner: &mut EffectRunner, params: &Params) -> Result<()> {
    let args = &params.options;
    let mut state = step_options(OptionsState::new(), OptionsMsg::Opened, runner);

    if args.clear {
        state = step_options(state, OptionsMsg::ClearClicked, runner);
    }
    if let Some(url) = &args.sheet_url {
        state = step_options(state, OptionsMsg::SheetUrlChanged(url.clone()), runner);
    }
    if let Some(path) = &args.json_key {
        let key = fs::read_to_string(path)
            .with_context(|| format!("reading json key {}", path.display()))?;
        state = step_options(state, OptionsMsg::JsonKeyChanged(key), runner);
    }
    if args.validate {
        state = step_options(state, OptionsMsg::ValidateClicked, runner);
    }
    if args.sheet_url.is_some() || args.json_key.is_some() {
        state = step_options(state, OptionsMsg::Submitted, runner);
    }

    let view = state.view();
    println!("Sheet URL: {}", view.sheet_url);
    println!("Sheet id:  {}", view.sheet_id);
    println!(
        "JSON key:  {}",
        if view.json_key.is_empty() { "not set" } else { "set" }
    );
    let mut failed = false;
    for error in view.url_error.iter().chain(view.json_error.iter()) {
        println!("[error] {error}");
        failed = true;
    }
    if failed {
        bail!("configuration has errors");
    }
    if let Some(error) = runner.take_errors().pop() {
        bail!("configuration not updated: {error}");
    }
    Ok(())
}
