// ============================================================================
// HISSABACK WIDGET - Terminal host
// ============================================================================
// Runs the embeddable cashback widget against a live backend from the shell:
// - claim [host-page.html]   mount the widget and walk the phone/OTP claim
// - rewards <phone>          list payouts for a verified end user
//
// Without a host page the embedding attributes come from HISSABACK_CAMPAIGN,
// HISSABACK_OFFER, HISSABACK_STYLE and HISSABACK_CONTAINER.
// ============================================================================

use anyhow::{anyhow, bail, Context, Result};
use hissaback_widget::{
    embed::{ATTR_CAMPAIGN, ATTR_CONTAINER, ATTR_OFFER, ATTR_STYLE},
    mount,
    widget::Control,
    HostPage, WidgetConfig, WidgetHost,
};
use shared::{Config, HissabackApi, HissabackClient};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: hissaback-widget [claim [host-page.html] | rewards <phone>]";

/// Renders the widget as plain terminal output.
struct TerminalHost {
    page: Option<HostPage>,
}

impl WidgetHost for TerminalHost {
    fn has_container(&self, container_id: &str) -> bool {
        self.page
            .as_ref()
            .map_or(true, |page| page.has_element(container_id))
    }

    fn render_error(&self, _container_id: &str, message: &str) {
        println!("{}", message);
    }

    fn render_button(&self, _container_id: &str, style: &str, label: &str) {
        println!("[{}] {}", style, label);
    }

    fn render_modal(&self, title: &str) {
        info!("🪟 Modal ready: {}", title);
    }

    fn set_modal_visible(&self, visible: bool) {
        if visible {
            println!("--- Claim your cashback ---");
        } else {
            println!("--- closed ---");
        }
    }

    fn show_otp_step(&self) {
        println!("OTP sent. Check your phone.");
    }

    fn set_control_enabled(&self, control: Control, enabled: bool) {
        if !enabled {
            let label = match control {
                Control::SendOtp => "Sending OTP...",
                Control::VerifyOtp => "Verifying...",
            };
            println!("{}", label);
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("⚠️  {}", message);
    }

    fn show_success(&self, message: &str) {
        println!("{}", message);
    }

    fn navigate(&self, url: &str) {
        println!("➡️  {}", url);
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn config_from_env() -> WidgetConfig {
    WidgetConfig::from_attributes(|name| {
        let var = match name {
            ATTR_CAMPAIGN => "HISSABACK_CAMPAIGN",
            ATTR_OFFER => "HISSABACK_OFFER",
            ATTR_STYLE => "HISSABACK_STYLE",
            ATTR_CONTAINER => "HISSABACK_CONTAINER",
            _ => return None,
        };
        std::env::var(var).ok()
    })
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> Result<Option<String>> {
    println!("{}", label);
    Ok(lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
        .map(|line| line.trim().to_string()))
}

async fn run_claim(page_path: Option<&str>, api: Arc<dyn HissabackApi>, config: &Config) -> Result<()> {
    let page = match page_path {
        Some(path) => {
            let html = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read host page {}", path))?;
            Some(HostPage::parse(&html))
        }
        None => None,
    };

    let widget_config = match &page {
        Some(page) => page
            .widget_config()
            .ok_or_else(|| anyhow!("Host page has no embedding <script> tag"))?,
        None => config_from_env(),
    };

    let host = Arc::new(TerminalHost { page });
    let Some(mut widget) = mount(widget_config, api, host, &config.widget)
        .await
        .into_mounted()
    else {
        return Ok(());
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    match prompt(&mut lines, "Press Enter to claim (q to quit)").await? {
        Some(answer) if answer != "q" => widget.click_button(),
        _ => return Ok(()),
    }

    loop {
        match prompt(&mut lines, "Phone number (x to close):").await? {
            Some(phone) if phone != "x" => {
                if widget.submit_phone(&phone).await.is_ok() {
                    break;
                }
            }
            _ => {
                widget.close_modal();
                return Ok(());
            }
        }
    }

    loop {
        match prompt(&mut lines, "6-digit OTP (x to close):").await? {
            Some(code) if code != "x" => {
                if let Ok(url) = widget.submit_otp(&code).await {
                    info!("🏁 Claim completed, merchant URL {}", url);
                    return Ok(());
                }
            }
            _ => {
                widget.close_modal();
                return Ok(());
            }
        }
    }
}

async fn show_rewards(phone: &str, api: &dyn HissabackApi) -> Result<()> {
    let rewards = api.user_payouts(phone).await?;
    if rewards.payouts.is_empty() {
        println!("No payouts yet for {}", phone);
        return Ok(());
    }

    for payout in &rewards.payouts {
        println!(
            "{}  ₹{:.2}  {}  {}",
            payout.payout_id,
            payout.amount,
            payout.method.as_deref().unwrap_or("-"),
            payout.voucher_code.as_deref().unwrap_or("-"),
        );
    }
    println!("Total: ₹{:.2} across {} payouts", rewards.total_amount(), rewards.payouts.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Config::from_env also loads .env
    let config = Config::from_env()?;
    init_tracing(&config.app.log_level);

    let api = Arc::new(HissabackClient::from_config(&config)?);
    info!("🔌 Backend: {} ({})", config.backend.api_url, config.app.environment);

    match api.health().await {
        Ok(status) if status.is_healthy() => info!("💚 Backend healthy"),
        Ok(status) => warn!("💛 Backend reports status '{}'", status.status),
        Err(e) => warn!("💔 Health probe failed: {}", e),
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let session = async {
        match args.first().map(String::as_str) {
            None => run_claim(None, api.clone(), &config).await,
            Some("claim") => run_claim(args.get(1).map(String::as_str), api.clone(), &config).await,
            Some("rewards") => {
                let phone = args.get(1).ok_or_else(|| anyhow!(USAGE))?;
                show_rewards(phone, api.as_ref()).await
            }
            Some("-h") | Some("--help") | Some("help") => {
                println!("{}", USAGE);
                Ok(())
            }
            Some(other) => bail!("unknown command '{}'\n{}", other, USAGE),
        }
    };

    tokio::select! {
        result = session => result,
        _ = tokio::signal::ctrl_c() => {
            info!("🛑 Interrupted, leaving without redirect");
            Ok(())
        }
    }
}
