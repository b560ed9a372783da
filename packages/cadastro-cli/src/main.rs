//! Terminal front-end for the member address form.
//!
//! ```bash
//! cargo run -p cadastro-cli -- --store /tmp/markers.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use cadastro::{AddressField, AddressForm, Config, StatusKind, StatusMessage};
use clap::Parser;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "cadastro", about = "Cadastro de endereço de membros")]
struct Args {
    /// Allow saving more than once for the same member
    #[arg(long)]
    no_guard: bool,

    /// Marker file (overrides CADASTRO_STORE_PATH)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Census backend base URL (overrides CENSO_API)
    #[arg(long)]
    censo_api: Option<String>,

    /// Address backend base URL (overrides ENDERECO_API)
    #[arg(long)]
    endereco_api: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    EditField,
    SelectRegion,
    SelectCity,
    Submit,
    Exit,
}

const EDITABLE_FIELDS: [AddressField; 5] = [
    AddressField::PostalCode,
    AddressField::Street,
    AddressField::Number,
    AddressField::Complement,
    AddressField::Neighborhood,
];

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't interleave with prompts
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if args.no_guard {
        config.save_guard = false;
    }
    if let Some(store) = args.store {
        config.store_path = store;
    }
    if let Some(url) = args.censo_api {
        config.censo_api_url = url;
    }
    if let Some(url) = args.endereco_api {
        config.endereco_api_url = url;
    }
    tracing::debug!(?config, "Configuration loaded");

    let mut form = AddressForm::from_config(&config).context("Failed to build address form")?;

    let term = Term::stdout();
    let theme = ColorfulTheme::default();
    print_banner(&term)?;

    sign_in(&mut form, &theme).await?;
    run_form(&mut form, &theme).await
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!(
        "{}",
        "╔════════════════════════════════════════╗".bright_cyan()
    );
    println!(
        "{}",
        "║        Cadastro de Endereço            ║".bright_cyan()
    );
    println!(
        "{}",
        "╚════════════════════════════════════════╝".bright_cyan()
    );
    println!();
    Ok(())
}

fn print_status(status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };
    let line = match status.kind {
        StatusKind::Success => format!("✅ {}", status.text).bright_green(),
        StatusKind::Info => format!("ℹ️  {}", status.text).bright_yellow(),
        StatusKind::Error | StatusKind::Blocking => format!("❌ {}", status.text).bright_red(),
    };
    println!("{}", line);
}

async fn sign_in(form: &mut AddressForm, theme: &ColorfulTheme) -> Result<()> {
    loop {
        let raw: String = Input::with_theme(theme)
            .with_prompt("Digite seu CPF ou Matrícula")
            .allow_empty(true)
            .interact_text()?;

        form.set_identity(&raw);
        if form.verify_identity().await.is_err() {
            print_status(form.status());
            continue;
        }

        if let Some(member) = form.member() {
            println!();
            println!("{}", member.atividade.bright_blue());
            println!("{}", member.nome.bold());
            println!("{}", member.congregacao.dimmed());
        }
        return Ok(());
    }
}

fn print_address(form: &AddressForm) {
    println!();
    println!("{}", "Cadastro de Endereço".bold());
    for field in AddressField::ALL {
        let value = form.address().get(field);
        let shown = if value.is_empty() {
            "—".dimmed().to_string()
        } else {
            value.to_string()
        };
        println!("  {:<12} {}", field.label(), shown);
    }
    if form.is_locked() {
        println!("{}", "  (somente leitura)".dimmed());
    }
    println!();
}

async fn run_form(form: &mut AddressForm, theme: &ColorfulTheme) -> Result<()> {
    loop {
        print_address(form);
        print_status(form.status());

        let mut actions: Vec<(Action, String)> = Vec::new();
        if !form.is_locked() {
            actions.push((Action::EditField, "Editar campo".to_string()));
            actions.push((Action::SelectRegion, "Selecionar estado".to_string()));
            if form.city_selectable() {
                actions.push((Action::SelectCity, "Selecionar cidade".to_string()));
            }
        }
        let submit_label = if form.can_submit() || form.is_locked() {
            form.submit_label().to_string()
        } else {
            format!("{} (incompleto)", form.submit_label())
        };
        actions.push((Action::Submit, submit_label));
        actions.push((Action::Exit, "Sair".to_string()));

        let labels: Vec<&str> = actions.iter().map(|(_, label)| label.as_str()).collect();
        let selection = Select::with_theme(theme)
            .with_prompt("O que deseja fazer?")
            .items(&labels)
            .default(0)
            .interact()?;

        form.clear_status();
        match actions[selection].0 {
            Action::EditField => edit_field(form, theme).await?,
            Action::SelectRegion => select_region(form, theme)?,
            Action::SelectCity => select_city(form, theme)?,
            Action::Submit => {
                form.submit().await?;
            }
            Action::Exit => {
                println!("{}", "👋 Até logo!".bright_blue());
                return Ok(());
            }
        }
    }
}

async fn edit_field(form: &mut AddressForm, theme: &ColorfulTheme) -> Result<()> {
    let labels: Vec<&str> = EDITABLE_FIELDS.iter().map(|f| f.label()).collect();
    let index = Select::with_theme(theme)
        .with_prompt("Campo")
        .items(&labels)
        .default(0)
        .interact()?;
    let field = EDITABLE_FIELDS[index];

    let value: String = Input::with_theme(theme)
        .with_prompt(field.label())
        .with_initial_text(form.address().get(field))
        .allow_empty(true)
        .interact_text()?;

    form.update_field(field, &value).await;
    Ok(())
}

fn select_region(form: &mut AddressForm, theme: &ColorfulTheme) -> Result<()> {
    let regions = form.region_options();
    let current = regions
        .iter()
        .position(|r| *r == form.address().region)
        .unwrap_or(0);

    let index = Select::with_theme(theme)
        .with_prompt("Selecione o Estado")
        .items(&regions)
        .default(current)
        .interact()?;

    form.select_region(regions[index]);
    Ok(())
}

fn select_city(form: &mut AddressForm, theme: &ColorfulTheme) -> Result<()> {
    let cities = form.city_options();
    if cities.is_empty() {
        println!("{}", "Nenhuma cidade cadastrada para este estado.".bright_yellow());
        return Ok(());
    }
    let current = cities
        .iter()
        .position(|c| *c == form.address().city)
        .unwrap_or(0);

    let index = Select::with_theme(theme)
        .with_prompt("Selecione a Cidade")
        .items(&cities)
        .default(current)
        .interact()?;

    form.select_city(&cities[index]);
    Ok(())
}
