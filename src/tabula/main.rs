use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tabula::config::ConsoleConfig;
use tabula::console::{Console, ConsoleEvent, ScreenId};
use tabula::error::{Result, TabulaError};
use tabula::model::{Draft, FieldValue, Record, RecordId};
use tabula::profile::Theme;
use tabula::report::{Report, ReportKind};
use tabula::schema::{EntitySchema, FieldKind};
use tabula::screen::{Notice, NoticeLevel, Screen};
use tabula::seed::ActivityKind;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

mod args;
mod styles;
use args::Cli;
use styles::TABULA_THEME;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    console: Console,
    line_width: usize,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    if let Some(name) = &cli.screen {
        ctx.console.activate(name.parse()?);
    }
    print_active(&ctx);

    loop {
        for event in ctx.console.tick(Instant::now()) {
            print_event(&ctx, &event);
        }

        print!("{}> ", ctx.console.active());
        io::stdout().flush().map_err(TabulaError::Io)?;

        let Some(line) = read_line()? else { break };
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if let Err(e) = dispatch(&mut ctx, &line) {
            println!("{}", e.to_string().red());
        }
    }

    Ok(())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = match std::env::var_os("TABULA_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("com", "tabula", "tabula")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let config = ConsoleConfig::load(&config_dir).unwrap_or_default();

    let line_width = cli.width.unwrap_or(config.line_width);
    let console = Console::new(config)?;

    Ok(AppContext { console, line_width })
}

fn read_line() -> Result<Option<String>> {
    let mut input = String::new();
    let read = io::stdin().read_line(&mut input).map_err(TabulaError::Io)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn dispatch(ctx: &mut AppContext, line: &str) -> Result<()> {
    let (verb, rest) = split_command(line);

    // Bare screen names switch from anywhere.
    if rest.is_empty() {
        if let Ok(id) = verb.parse::<ScreenId>() {
            ctx.console.activate(id);
            print_active(ctx);
            return Ok(());
        }
    }

    match verb {
        "help" => {
            print_help(ctx.console.active());
            Ok(())
        }
        _ => match ctx.console.active() {
            ScreenId::Dashboard => handle_dashboard(ctx, verb),
            ScreenId::Users | ScreenId::Products | ScreenId::Documents => {
                handle_collection(ctx, verb, rest)
            }
            ScreenId::Reports => handle_reports(ctx, verb, rest),
            ScreenId::Settings => handle_settings(ctx, verb, rest),
            ScreenId::Login => handle_login(ctx, verb, rest),
        },
    }
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    }
}

fn handle_dashboard(ctx: &mut AppContext, verb: &str) -> Result<()> {
    match verb {
        "show" | "list" => {
            print_dashboard(&ctx.console);
            Ok(())
        }
        _ => Err(unknown_command(verb)),
    }
}

fn handle_collection(ctx: &mut AppContext, verb: &str, rest: &str) -> Result<()> {
    let width = ctx.line_width;
    let active = ctx.console.active();
    let screen = active_collection(&mut ctx.console)?;

    match verb {
        "list" | "ls" => {
            print_records(screen, width);
            Ok(())
        }
        "search" => {
            screen.set_query(rest);
            print_records(screen, width);
            Ok(())
        }
        "view" => {
            let id = resolve_row_arg(screen, rest)?;
            print_record_detail(screen, &id);
            Ok(())
        }
        "check" if rest == "all" => {
            screen.select_all_visible();
            println!("{} selected.", screen.selection().len());
            Ok(())
        }
        "check" => {
            let id = resolve_row_arg(screen, rest)?;
            screen.toggle_selection(&id);
            println!("{} selected.", screen.selection().len());
            Ok(())
        }
        "clear" => {
            screen.clear_selection();
            Ok(())
        }
        "edit" => {
            let id = resolve_row_arg(screen, rest)?;
            screen.begin_edit(&id)?;
            if let Some(draft) = screen.edit().draft() {
                print_draft(screen.schema(), draft);
            }
            println!("{}", hint("Set fields with `set <field> <value>`, then `save`."));
            Ok(())
        }
        "set" => handle_set(screen, rest),
        "save" => {
            let outcome = screen.commit_edit()?;
            print_notices(&outcome.notices);
            Ok(())
        }
        "cancel" => {
            screen.cancel_edit();
            Ok(())
        }
        "new" => {
            screen.open_form();
            if let Some(draft) = screen.form().draft() {
                print_draft(screen.schema(), draft);
            }
            println!("{}", hint("Set fields with `set <field> <value>`, then `submit`."));
            Ok(())
        }
        "submit" => {
            let outcome = screen.submit_form()?;
            print_notices(&outcome.notices);
            Ok(())
        }
        "discard" => {
            screen.discard_form();
            Ok(())
        }
        "delete" if rest == "selected" => handle_delete_selected(screen),
        "delete" => handle_delete_one(screen, active, rest),
        "grab" if active == ScreenId::Documents => {
            let id = resolve_row_arg(screen, rest)?;
            screen.pick_up(id);
            Ok(())
        }
        "drop" if active == ScreenId::Documents => {
            let target = resolve_row_arg(screen, rest)?;
            screen.drop_on(&target);
            print_records(screen, width);
            Ok(())
        }
        _ => Err(unknown_command(verb)),
    }
}

fn handle_set(screen: &mut Screen, rest: &str) -> Result<()> {
    let (field, raw) = split_command(rest);
    if field.is_empty() {
        return Err(TabulaError::Input("Usage: set <field> <value>".into()));
    }
    let value = parse_field_value(screen.schema(), field, raw)?;

    if screen.edit().is_editing() {
        screen.edit_field(field, value)
    } else if screen.form().is_open() {
        screen.set_form_field(field, value)
    } else {
        Err(TabulaError::Input(
            "Nothing is open for editing. Use `edit <row>` or `new` first.".into(),
        ))
    }
}

fn handle_delete_one(screen: &mut Screen, active: ScreenId, rest: &str) -> Result<()> {
    let id = resolve_row_arg(screen, rest)?;

    if active == ScreenId::Documents {
        let title = screen
            .record(&id)
            .map(|r| leading_value(screen.schema(), r))
            .unwrap_or_default();
        println!("This will permanently remove: {}", title);
        if !confirm_prompt()? {
            println!("{}", "Operation cancelled.".dimmed());
            return Ok(());
        }
    }

    let outcome = screen.delete(&id);
    print_notices(&outcome.notices);
    Ok(())
}

fn handle_delete_selected(screen: &mut Screen) -> Result<()> {
    let outcome = match screen.request_delete_selected() {
        Ok(outcome) => outcome,
        Err(TabulaError::EmptySelection) => {
            println!(
                "{}",
                format!("Please select {} to delete.", screen.schema().plural).red()
            );
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!(
        "This will permanently remove the following {}:",
        screen.schema().plural
    );
    for record in &outcome.affected {
        println!("  {}", leading_value(screen.schema(), record));
    }

    if confirm_prompt()? {
        let outcome = screen.confirm_delete_selected();
        print_notices(&outcome.notices);
    } else {
        screen.cancel_delete_selected();
        println!("{}", "Operation cancelled.".dimmed());
    }
    Ok(())
}

fn handle_reports(ctx: &mut AppContext, verb: &str, rest: &str) -> Result<()> {
    match verb {
        "generate" => {
            let kind = if rest.is_empty() {
                ReportKind::Sales
            } else {
                rest.parse()?
            };
            ctx.console.generate_report(kind, Instant::now());
            println!("{}", TABULA_THEME.muted.apply_to("Generating..."));
            Ok(())
        }
        "report" | "show" | "list" => {
            print_report_status(ctx);
            Ok(())
        }
        _ => Err(unknown_command(verb)),
    }
}

fn handle_settings(ctx: &mut AppContext, verb: &str, rest: &str) -> Result<()> {
    match verb {
        "show" | "list" => {
            print_profile(&ctx.console);
            Ok(())
        }
        "edit" => {
            ctx.console.profile_mut().begin_edit();
            print_profile(&ctx.console);
            println!("{}", hint("Set fields with `set <field> <value>`, then `save`."));
            Ok(())
        }
        "set" => {
            if !ctx.console.profile().is_editing() {
                return Err(TabulaError::Input(
                    "Profile is not being edited. Use `edit` first.".into(),
                ));
            }
            let (field, value) = split_command(rest);
            let form = ctx.console.profile_mut();
            match field {
                "name" => form.set_name(value),
                "email" => form.set_email(value),
                "bio" => form.set_bio(value),
                "theme" => form.set_theme(value.parse::<Theme>()?),
                "notifications" => form.set_notifications(parse_toggle(value)?),
                _ => return Err(TabulaError::UnknownField(field.to_string())),
            }
            Ok(())
        }
        "save" => {
            if let Some(notice) = ctx.console.profile_mut().save() {
                print_notices(&[notice]);
            }
            Ok(())
        }
        "cancel" => {
            ctx.console.profile_mut().cancel();
            Ok(())
        }
        _ => Err(unknown_command(verb)),
    }
}

fn handle_login(ctx: &mut AppContext, verb: &str, rest: &str) -> Result<()> {
    match verb {
        "set" => {
            let (field, value) = split_command(rest);
            match field {
                "email" => ctx.console.login_mut().set_email(value),
                "password" => ctx.console.login_mut().set_password(value),
                _ => {
                    return Err(TabulaError::Input(
                        "Usage: set <email|password> <value>".into(),
                    ))
                }
            }
            Ok(())
        }
        "submit" => {
            ctx.console.submit_login(Instant::now());
            println!("{}", TABULA_THEME.muted.apply_to("Signing in..."));
            Ok(())
        }
        "show" | "list" => {
            print_login(&ctx.console);
            Ok(())
        }
        _ => Err(unknown_command(verb)),
    }
}

fn active_collection(console: &mut Console) -> Result<&mut Screen> {
    console
        .active_screen_mut()
        .ok_or_else(|| TabulaError::Input("Not a collection screen.".into()))
}

fn confirm_prompt() -> Result<bool> {
    print!("[Y] To delete: ");
    io::stdout().flush().map_err(TabulaError::Io)?;
    let answer = read_line()?.unwrap_or_default();
    Ok(answer == "Y")
}

fn resolve_row_arg(screen: &Screen, arg: &str) -> Result<RecordId> {
    let row: usize = arg
        .parse()
        .map_err(|_| TabulaError::Input(format!("Invalid row number: {}", arg)))?;
    screen
        .resolve_row(row)
        .ok_or_else(|| TabulaError::Input(format!("No row {} on this screen.", row)))
}

fn parse_field_value(schema: &EntitySchema, field: &str, raw: &str) -> Result<FieldValue> {
    let spec = schema
        .field(field)
        .ok_or_else(|| TabulaError::UnknownField(field.to_string()))?;
    match spec.kind {
        // Unparseable input is carried as NaN and rejected when the draft
        // is validated.
        FieldKind::Number => Ok(FieldValue::number(raw.parse().unwrap_or(f64::NAN))),
        _ => Ok(FieldValue::text(raw)),
    }
}

fn parse_toggle(raw: &str) -> Result<bool> {
    match raw {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(TabulaError::Input(format!(
            "Expected on or off, got: {}",
            raw
        ))),
    }
}

fn leading_value(schema: &EntitySchema, record: &Record) -> String {
    schema
        .fields
        .first()
        .map(|f| record.text(&f.name).to_string())
        .unwrap_or_default()
}

fn unknown_command(verb: &str) -> TabulaError {
    TabulaError::Input(format!("Unknown command: {}. Try `help`.", verb))
}

fn print_event(ctx: &AppContext, event: &ConsoleEvent) {
    match event {
        ConsoleEvent::ReportReady(report) => print_report(report, ctx.line_width),
        ConsoleEvent::LoginSucceeded => println!("{}", "Logged in successfully!".green()),
        ConsoleEvent::LoginFailed(message) => println!("{}", message.red()),
    }
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Info => println!("{}", notice.content.dimmed()),
            NoticeLevel::Success => println!("{}", notice.content.green()),
            NoticeLevel::Warning => println!("{}", notice.content.yellow()),
            NoticeLevel::Error => println!("{}", notice.content.red()),
        }
    }
}

fn print_active(ctx: &AppContext) {
    match ctx.console.active() {
        ScreenId::Dashboard => print_dashboard(&ctx.console),
        ScreenId::Users | ScreenId::Products | ScreenId::Documents => {
            if let Some(screen) = ctx.console.active_screen() {
                print_records(screen, ctx.line_width);
            }
        }
        ScreenId::Reports => print_report_status(ctx),
        ScreenId::Settings => print_profile(&ctx.console),
        ScreenId::Login => print_login(&ctx.console),
    }
}

const TIME_WIDTH: usize = 14;
const PREFIX_WIDTH: usize = 4;
const MIN_COLUMN_WIDTH: usize = 8;
const CHECK_MARKER: &str = "✓";

fn print_records(screen: &Screen, line_width: usize) {
    let schema = screen.schema();
    let visible = screen.visible();
    if visible.is_empty() {
        println!("No {} found.", schema.plural);
        return;
    }

    let index_width = visible.len().to_string().len() + 2;
    let fixed = PREFIX_WIDTH + index_width + TIME_WIDTH;
    let widths = fit_widths(column_widths(schema, &visible), fixed, line_width);

    let mut header = " ".repeat(PREFIX_WIDTH + index_width);
    for (field, width) in schema.fields.iter().zip(&widths) {
        header.push_str(&pad_cell(&field.label, *width));
        header.push_str("  ");
    }
    println!("{}", TABULA_THEME.header.apply_to(header.trim_end()));

    for (row, record) in visible.iter().enumerate() {
        let selected = screen.selection().contains(&record.id);
        let left_prefix = if selected {
            format!("  {} ", CHECK_MARKER.green())
        } else {
            " ".repeat(PREFIX_WIDTH)
        };

        let index = format!("{}. ", row + 1);
        let mut line = String::new();
        for (field, width) in schema.fields.iter().zip(&widths) {
            let value = record
                .get(&field.name)
                .map(|v| v.to_string())
                .unwrap_or_default();
            line.push_str(&pad_cell(&value, *width));
            line.push_str("  ");
        }

        let time_ago = format_time_ago(record.updated_at);
        println!(
            "{}{:<w$}{}{}",
            left_prefix,
            index,
            line,
            time_ago.dimmed(),
            w = index_width
        );
    }
}

fn column_widths(schema: &EntitySchema, records: &[&Record]) -> Vec<usize> {
    schema
        .fields
        .iter()
        .map(|field| {
            let longest = records
                .iter()
                .map(|r| {
                    r.get(&field.name)
                        .map(|v| v.to_string().width())
                        .unwrap_or(0)
                })
                .max()
                .unwrap_or(0);
            longest.max(field.label.width())
        })
        .collect()
}

/// Shrinks the widest column until the table fits the line width.
fn fit_widths(mut widths: Vec<usize>, fixed: usize, line_width: usize) -> Vec<usize> {
    let gaps = widths.len() * 2;
    let mut total = fixed + gaps + widths.iter().sum::<usize>();
    while total > line_width {
        let Some((widest, width)) = widths.iter().copied().enumerate().max_by_key(|&(_, w)| w)
        else {
            break;
        };
        if width <= MIN_COLUMN_WIDTH {
            break;
        }
        widths[widest] = width - 1;
        total -= 1;
    }
    widths
}

fn pad_cell(value: &str, width: usize) -> String {
    let shown = truncate_to_width(value, width);
    let padding = width.saturating_sub(shown.width());
    format!("{}{}", shown, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    // Singular units are one character narrower; the doubled space keeps
    // the trailing "ago" aligned.
    let time_str = time_str
        .replace("hour ago", "hour  ago")
        .replace("minute ago", "minute  ago")
        .replace("second ago", "second  ago")
        .replace("day ago", "day  ago")
        .replace("week ago", "week  ago")
        .replace("month ago", "month  ago")
        .replace("year ago", "year  ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

fn print_record_detail(screen: &Screen, id: &RecordId) {
    let Some(record) = screen.record(id) else {
        return;
    };
    let schema = screen.schema();

    println!(
        "{} {}",
        TABULA_THEME.detail_index.apply_to(id.as_str()),
        TABULA_THEME
            .detail_title
            .apply_to(leading_value(schema, record))
    );
    println!("--------------------------------");
    for field in schema.fields.iter().skip(1) {
        let value = record
            .get(&field.name)
            .map(|v| v.to_string())
            .unwrap_or_default();
        println!(
            "{} {}",
            TABULA_THEME.field_label.apply_to(format!("{}:", field.label)),
            value
        );
    }
    println!(
        "{} {}",
        TABULA_THEME.field_label.apply_to("Updated:"),
        format_time_ago(record.updated_at).trim_start()
    );
}

fn print_draft(schema: &EntitySchema, draft: &Draft) {
    for field in &schema.fields {
        let value = draft
            .get(&field.name)
            .map(|v| v.to_string())
            .unwrap_or_default();
        println!(
            "  {} {}",
            TABULA_THEME
                .field_label
                .apply_to(format!("{:<14}", format!("{}:", field.label))),
            value
        );
    }
}

fn print_dashboard(console: &Console) {
    let summary = console.dashboard_summary();
    println!("{}", TABULA_THEME.header.apply_to("Dashboard"));
    println!("  Total Users      {}", summary.total_users);
    println!("  Total Products   {}", summary.total_products);
    println!("  Inventory Value  ${:.2}", summary.inventory_value);
    println!();
    println!("{}", TABULA_THEME.header.apply_to("Recent Activity"));
    for activity in console.activity_feed() {
        let marker = match activity.kind {
            ActivityKind::Success => "✔".green(),
            ActivityKind::Warning => "!".yellow(),
            ActivityKind::Error => "✖".red(),
        };
        println!("  {} {}", marker, activity.text);
    }
}

fn print_report_status(ctx: &AppContext) {
    let desk = ctx.console.reports();
    if desk.is_generating() {
        println!("{}", TABULA_THEME.muted.apply_to("Generating..."));
    } else if let Some(report) = desk.latest() {
        print_report(report, ctx.line_width);
    } else {
        println!("No report generated yet.");
    }
}

fn print_report(report: &Report, line_width: usize) {
    match report {
        Report::Sales(rows) => {
            println!("{}", TABULA_THEME.header.apply_to("Sales Report"));
            let peak = rows.iter().map(|r| r.sales).max().unwrap_or(1).max(1);
            let bar_space = line_width.saturating_sub(16).clamp(8, 48);
            for row in rows {
                let bar_len = (row.sales as usize * bar_space) / peak as usize;
                println!(
                    "  {:<4} {:>5}  {}",
                    row.month,
                    row.sales,
                    "█".repeat(bar_len).cyan()
                );
            }
        }
        Report::Inventory(rows) => {
            println!("{}", TABULA_THEME.header.apply_to("Inventory Report"));
            let name_width = rows
                .iter()
                .map(|r| r.product.width())
                .max()
                .unwrap_or(0)
                .max("Product".width());
            for row in rows {
                println!(
                    "  {}  {:>6}  {}",
                    pad_cell(&row.product, name_width),
                    row.stock,
                    row.category
                );
            }
        }
    }
}

fn print_profile(console: &Console) {
    let form = console.profile();
    let profile = form.view();

    let heading = if form.is_editing() {
        "Profile (editing)"
    } else {
        "Profile"
    };
    println!("{}", TABULA_THEME.header.apply_to(heading));
    print_profile_field("Name:", &profile.name);
    print_profile_field("Email:", &profile.email);
    print_profile_field("Bio:", &profile.bio);
    print_profile_field("Theme:", &profile.theme.to_string());
    print_profile_field(
        "Notifications:",
        if profile.notifications_enabled {
            "on"
        } else {
            "off"
        },
    );
}

fn print_profile_field(label: &str, value: &str) {
    println!(
        "  {} {}",
        TABULA_THEME.field_label.apply_to(format!("{:<14}", label)),
        value
    );
}

fn print_login(console: &Console) {
    let form = console.login();
    if form.is_logged_in() {
        println!("{}", format!("Signed in as {}.", form.email()).green());
        return;
    }

    println!(
        "  {} {}",
        TABULA_THEME.field_label.apply_to(format!("{:<14}", "Email:")),
        form.email()
    );
    if form.is_submitting() {
        println!("{}", TABULA_THEME.muted.apply_to("Signing in..."));
    }
    if let Some(error) = form.error() {
        println!("{}", error.red());
    }
}

fn hint(text: &str) -> String {
    TABULA_THEME.muted.apply_to(text).to_string()
}

fn print_help(active: ScreenId) {
    println!("Screens: dashboard, users, products, reports, documents, settings, login");
    println!("Type a screen name to switch. `quit` exits.");
    println!();
    match active {
        ScreenId::Dashboard => {
            println!("Commands on the dashboard:");
            println!("  show                    Summary cards and recent activity");
        }
        ScreenId::Users | ScreenId::Products | ScreenId::Documents => {
            println!("Commands on this screen:");
            println!("  list                    Current rows");
            println!("  search <term>           Filter rows; an empty term clears the filter");
            println!("  view <row>              Full record");
            println!("  check <row> | check all | clear");
            println!("  edit <row>, set <field> <value>, save, cancel");
            println!("  new, set <field> <value>, submit, discard");
            println!("  delete <row>            Remove one record");
            println!("  delete selected         Remove every checked record (asks first)");
            if active == ScreenId::Documents {
                println!("  grab <row>, drop <row>  Move a record in front of another");
            }
        }
        ScreenId::Reports => {
            println!("Commands on the reports screen:");
            println!("  generate [sales|inventory]");
            println!("  report                  Latest generated report");
            println!("  (press Enter to refresh while a report is generating)");
        }
        ScreenId::Settings => {
            println!("Commands on the settings screen:");
            println!("  show, edit, set <field> <value>, save, cancel");
            println!("  Fields: name, email, bio, theme (dark|light), notifications (on|off)");
        }
        ScreenId::Login => {
            println!("Commands on the login screen:");
            println!("  set email <address>, set password <secret>, submit, show");
        }
    }
}
