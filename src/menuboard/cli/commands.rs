//! # CLI Layer
//!
//! This module is **one possible front end** for menuboard, not the
//! application itself. It is the only place that:
//! - Parses arguments
//! - Resolves the config directory and installs logging
//! - Prints to stdout
//!
//! Each command is a short script over [`MenuboardApi`]: load the screen,
//! apply the same named actions a browser would fire (`search`, `page-size`,
//! `go-to-page`, ...), then render the resulting view and messages.
//!
//! Errors bubble up to `main`, which prints `Error: <message>` and exits 1.

use super::args::{CategoryCommands, Cli, Commands, ListArgs, MenuCommands, PriceArgs};
use super::render::{
    build_category_table_value, build_config_value, build_menu_grid_value,
    build_messages_value, build_storefront_value, render_template,
};
use clap::Parser;
use directories::ProjectDirs;
use menuboard::api::MenuboardApi;
use menuboard::backend::http::HttpBackend;
use menuboard::config::{MenuboardConfig, API_ENV};
use menuboard::error::{MenuboardError, Result};
use menuboard::form::{CategoryForm, MenuForm, PriceInput};
use menuboard::screens::{Outcome, ScreenMessage};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Overrides the platform config directory.
pub const CONFIG_DIR_ENV: &str = "MENUBOARD_CONFIG_DIR";

struct AppContext {
    api: MenuboardApi<HttpBackend>,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = config_dir()?;
    let use_color = !cli.no_color && console::Term::stdout().features().colors_supported();

    match cli.command {
        Commands::Config { key, value } => {
            handle_config(&config_dir, key.as_deref(), value.as_deref(), use_color)
        }
        Commands::Categories { action } => {
            let mut ctx = init_context(cli.api.as_deref(), &config_dir, use_color)?;
            handle_categories(&mut ctx, action)
        }
        Commands::Menus { action } => {
            let mut ctx = init_context(cli.api.as_deref(), &config_dir, use_color)?;
            handle_menus(&mut ctx, action)
        }
        Commands::Browse {
            search,
            category,
            sort,
        } => {
            let mut ctx = init_context(cli.api.as_deref(), &config_dir, use_color)?;
            handle_browse(&mut ctx, search, category, sort)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "menuboard", "menuboard")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| MenuboardError::Config("Could not determine config dir".to_string()))
}

/// Config file, then `MENUBOARD_API`, then `--api`.
fn init_context(api_flag: Option<&str>, config_dir: &Path, use_color: bool) -> Result<AppContext> {
    let mut config =
        MenuboardConfig::load(config_dir)?.with_env_override(std::env::var(API_ENV).ok());
    if let Some(api) = api_flag {
        config.set("api-base", api)?;
    }
    debug!(api_base = %config.api_base, "using menu API");

    let backend = HttpBackend::new(&config.api_base, config.timeout())?;
    Ok(AppContext {
        api: MenuboardApi::new(backend, &config),
        use_color,
    })
}

fn print_rendered<T: Serialize>(template: &str, data: &T, use_color: bool) -> Result<()> {
    let output = render_template(template, data, use_color)
        .map_err(|e| MenuboardError::Render(e.to_string()))?;
    print!("{}", output);
    Ok(())
}

fn print_messages(outcome: &Outcome, use_color: bool) -> Result<()> {
    if outcome.messages.is_empty() {
        return Ok(());
    }
    print_rendered("messages", &build_messages_value(&outcome.messages), use_color)
}

fn handle_config(
    config_dir: &Path,
    key: Option<&str>,
    value: Option<&str>,
    use_color: bool,
) -> Result<()> {
    let mut config = MenuboardConfig::load(config_dir)?;
    match (key, value) {
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(config_dir)?;
            let shown = config.get(key).unwrap_or_default();
            let outcome = Outcome::with(ScreenMessage::success(format!("{} = {}", key, shown)));
            print_messages(&outcome, use_color)
        }
        (Some(key), None) => {
            if config.get(key).is_none() {
                return Err(MenuboardError::Config(format!("Unknown config key: {}", key)));
            }
            print_rendered("config", &build_config_value(&config, Some(key)), use_color)
        }
        _ => print_rendered("config", &build_config_value(&config, None), use_color),
    }
}

/// Applies search, page size and page in the order a user would click them.
fn apply_list_args<F>(list: &ListArgs, outcome: &mut Outcome, mut action: F) -> Result<()>
where
    F: FnMut(&str, &str) -> Result<Outcome>,
{
    if let Some(term) = &list.search {
        outcome.extend(action("search", term)?);
    }
    if let Some(size) = &list.page_size {
        outcome.extend(action("page-size", size)?);
    }
    outcome.extend(action("go-to-page", &list.page)?);
    Ok(())
}

fn handle_categories(ctx: &mut AppContext, action: CategoryCommands) -> Result<()> {
    let outcome = match action {
        CategoryCommands::List { list } => {
            let api = &mut ctx.api;
            let mut outcome = api.category_action("reload", "")?;
            apply_list_args(&list, &mut outcome, |name, arg| api.category_action(name, arg))?;
            let view = api.category_view();
            print_rendered("categories", &build_category_table_value(&view), ctx.use_color)?;
            outcome
        }
        CategoryCommands::Create {
            name,
            description,
            order,
            inactive,
        } => ctx.api.create_category(CategoryForm {
            name,
            description,
            order: CategoryForm::parse_order(&order),
            active: !inactive,
        })?,
        CategoryCommands::Update {
            id,
            name,
            description,
            order,
            active,
            inactive,
        } => ctx.api.update_category(&id, |form| {
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(order) = order {
                form.order = CategoryForm::parse_order(&order);
            }
            if active {
                form.active = true;
            }
            if inactive {
                form.active = false;
            }
        })?,
        CategoryCommands::Delete { id } => ctx.api.delete_category(&id)?,
    };
    print_messages(&outcome, ctx.use_color)
}

/// Reads the pricing flags. `None` when no price flag was given.
pub fn price_input(args: &PriceArgs) -> Result<Option<PriceInput>> {
    if args.is_empty() {
        return Ok(None);
    }
    let incomplete = |flags: &str| {
        MenuboardError::Validation(format!("Both {} are required", flags))
    };
    let input = match (args.price, args.min_price, args.max_price) {
        (Some(price), _, _) => PriceInput::Single { price },
        (None, Some(min), Some(max)) => PriceInput::Range { min, max },
        (None, Some(_), None) | (None, None, Some(_)) => {
            return Err(incomplete("--min-price and --max-price"))
        }
        (None, None, None) => match (args.regular_price, args.promo_price) {
            (Some(price), Some(promotion)) => PriceInput::Promotion { price, promotion },
            _ => return Err(incomplete("--regular-price and --promo-price")),
        },
    };
    Ok(Some(input))
}

fn handle_menus(ctx: &mut AppContext, action: MenuCommands) -> Result<()> {
    let outcome = match action {
        MenuCommands::List { list, category } => {
            let api = &mut ctx.api;
            let mut outcome = api.menu_action("reload", "")?;
            if let Some(category) = &category {
                outcome.extend(api.menu_action("filter-category", category)?);
            }
            apply_list_args(&list, &mut outcome, |name, arg| api.menu_action(name, arg))?;
            let view = api.menu_view();
            print_rendered("menus", &build_menu_grid_value(&view), ctx.use_color)?;
            outcome
        }
        MenuCommands::Create {
            title,
            category,
            description,
            price,
            currency,
            image,
            unavailable,
            featured,
        } => {
            let form = MenuForm {
                title: title.unwrap_or_default(),
                category_id: category.unwrap_or_default(),
                description: description.unwrap_or_default(),
                currency: currency.unwrap_or_default(),
                available: !unavailable,
                featured,
                price: price_input(&price)?.unwrap_or_default(),
                image_file: image,
                ..MenuForm::new()
            };
            ctx.api.create_menu(form)?
        }
        MenuCommands::Update {
            id,
            title,
            category,
            description,
            price,
            currency,
            image,
            available,
            unavailable,
            featured,
            not_featured,
        } => {
            let price = price_input(&price)?;
            ctx.api.update_menu(&id, |form| {
                if let Some(title) = title {
                    form.title = title;
                }
                if let Some(category) = category {
                    form.category_id = category;
                }
                if let Some(description) = description {
                    form.description = description;
                }
                if let Some(price) = price {
                    form.price = price;
                }
                if let Some(currency) = currency {
                    form.currency = currency;
                }
                if image.is_some() {
                    form.image_file = image;
                }
                if available || unavailable {
                    form.available = available;
                }
                if featured || not_featured {
                    form.featured = featured;
                }
            })?
        }
        MenuCommands::Delete { id } => ctx.api.delete_menu(&id)?,
    };
    print_messages(&outcome, ctx.use_color)
}

fn handle_browse(
    ctx: &mut AppContext,
    search: Option<String>,
    category: Option<String>,
    sort: Option<String>,
) -> Result<()> {
    let api = &mut ctx.api;
    let mut outcome = api.storefront_action("reload", "")?;
    if let Some(category) = &category {
        outcome.extend(api.storefront_action("select-tab", category)?);
    }
    if let Some(term) = &search {
        outcome.extend(api.storefront_action("search", term)?);
    }
    if let Some(sort) = &sort {
        outcome.extend(api.storefront_action("sort", sort)?);
    }

    let storefront = api.storefront();
    let data = build_storefront_value(&storefront.view(), &storefront.tabs(), storefront.sort());
    print_rendered("storefront", &data, ctx.use_color)?;
    print_messages(&outcome, ctx.use_color)
}
