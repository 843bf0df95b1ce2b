use crate::app::{App, Confirm, Modal, Notice, NoticeKind, StockForm, StockSide, Tab};
use crate::gateway::Gateway;
use crate::model::{Product, StockStatus};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

pub fn run_ui<G: Gateway>(app: &mut App<G>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend, G: Gateway>(
    terminal: &mut Terminal<B>,
    app: &mut App<G>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(());
        }

        // Blocking notice eats the next key
        if app.notice.is_some() {
            app.dismiss_notice();
            continue;
        }

        // Open dialogs take the keyboard before tab-level bindings
        match &app.modal {
            Modal::Confirm(_) => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                        app.confirm_pending()
                    }
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        app.decline_pending()
                    }
                    _ => {}
                }
                continue;
            }
            Modal::AddProduct(_) | Modal::EditProduct(_) => {
                handle_form_key(app, key.code);
                continue;
            }
            Modal::None => {}
        }

        if app.searching {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => app.finish_search(),
                KeyCode::Backspace => app.backspace_search(),
                KeyCode::Char(c) => app.push_search_char(c),
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Esc => return Ok(()),
            KeyCode::Tab => {
                app.next_tab();
                continue;
            }
            KeyCode::BackTab => {
                app.previous_tab();
                continue;
            }
            _ => {}
        }

        match app.tab {
            Tab::Products => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
                KeyCode::Char('/') => app.start_search(),
                KeyCode::Char('c') => app.cycle_category(),
                KeyCode::Char('v') => app.cycle_subcategory(),
                KeyCode::Char('b') => app.cycle_brand(),
                KeyCode::Char('x') => app.clear_filters(),
                KeyCode::Char('a') => app.open_add_modal(),
                KeyCode::Char('e') => app.open_edit_modal(),
                KeyCode::Char('d') => app.request_delete_selected(),
                KeyCode::Char('r') => {
                    app.reload_products();
                    app.reload_option_lists();
                }
                KeyCode::Char('1') => app.request_admin(Confirm::Seed),
                KeyCode::Char('2') => app.request_admin(Confirm::CleanupDuplicates),
                KeyCode::Char('3') => app.request_admin(Confirm::ClearAllProducts),
                _ => {}
            },
            Tab::Stock => handle_stock_key(app, key.code),
            Tab::Monitoring => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('r') => app.refresh_alerts(),
                _ => {}
            },
            Tab::Reports => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('r') => app.refresh_report(),
                KeyCode::Char('e') => app.export_csv(),
                _ => {}
            },
        }
    }
}

fn handle_form_key<G: Gateway>(app: &mut App<G>, code: KeyCode) {
    if let KeyCode::Esc = code {
        app.close_modal();
        return;
    }
    if let KeyCode::Enter = code {
        match &app.modal {
            Modal::AddProduct(_) => app.submit_add(),
            Modal::EditProduct(_) => app.submit_edit(),
            _ => {}
        }
        return;
    }

    let form = match &mut app.modal {
        Modal::AddProduct(form) => form,
        Modal::EditProduct(session) => &mut session.form,
        _ => return,
    };
    match code {
        KeyCode::Down | KeyCode::Tab => form.focus_next(),
        KeyCode::Up | KeyCode::BackTab => form.focus_previous(),
        KeyCode::Backspace => {
            form.active_value_mut().pop();
        }
        KeyCode::Char(c) => form.active_value_mut().push(c),
        _ => {}
    }
}

fn handle_stock_key<G: Gateway>(app: &mut App<G>, code: KeyCode) {
    let picker_len = app.picker_products.len();
    let side = app.stock_focus;
    let focus = active_stock_form(app).focus;
    match code {
        KeyCode::Left | KeyCode::Right => {
            app.stock_focus = match side {
                StockSide::In => StockSide::Out,
                StockSide::Out => StockSide::In,
            };
        }
        KeyCode::Down => active_stock_form(app).focus_next(),
        KeyCode::Up => active_stock_form(app).focus_previous(),
        KeyCode::Enter => app.submit_stock(side),
        KeyCode::Backspace if focus == 1 => {
            active_stock_form(app).quantity.pop();
        }
        KeyCode::Backspace if focus == 2 => {
            active_stock_form(app).notes.pop();
        }
        // The picker is not a text field; j/k/space cycle it, r reloads it
        KeyCode::Char('r') if focus == 0 => app.reload_pickers(),
        KeyCode::Char('j') | KeyCode::Char(' ') if focus == 0 => {
            active_stock_form(app).select_next_product(picker_len)
        }
        KeyCode::Char('k') if focus == 0 => {
            active_stock_form(app).select_previous_product(picker_len)
        }
        KeyCode::Char(c) if focus == 1 => active_stock_form(app).quantity.push(c),
        KeyCode::Char(c) if focus == 2 => active_stock_form(app).notes.push(c),
        _ => {}
    }
}

fn active_stock_form<G: Gateway>(app: &mut App<G>) -> &mut StockForm {
    match app.stock_focus {
        StockSide::In => &mut app.stock_in_form,
        StockSide::Out => &mut app.stock_out_form,
    }
}

fn ui<G: Gateway>(f: &mut Frame, app: &App<G>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with tabs
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.tab {
        Tab::Products => render_products(f, chunks[1], app),
        Tab::Stock => render_stock(f, chunks[1], app),
        Tab::Monitoring => render_monitoring(f, chunks[1], app),
        Tab::Reports => render_reports(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);

    match &app.modal {
        Modal::AddProduct(form) => render_form_popup(f, "Add Product", form),
        Modal::EditProduct(session) => render_form_popup(f, "Edit Product", &session.form),
        Modal::Confirm(action) => render_confirm_popup(f, action),
        Modal::None => {}
    }

    if let Some(notice) = &app.notice {
        render_notice_popup(f, notice);
    }
}

fn render_header<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
    let tabs = [Tab::Products, Tab::Stock, Tab::Monitoring, Tab::Reports];

    let mut tab_spans = vec![];
    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *tab == app.tab {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(tab.title(), style));
    }

    let low_count = app
        .products
        .iter()
        .filter(|p| p.status() == StockStatus::LowStock)
        .count();

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Products: {}", app.products.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Low: {low_count}"),
        Style::default().fg(if low_count > 0 {
            Color::Red
        } else {
            Color::Green
        }),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Inventory Dashboard "),
    );

    f.render_widget(header, area);
}

fn render_products<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter bar
            Constraint::Min(0),    // Table
        ])
        .split(area);

    render_filter_bar(f, chunks[0], app);

    if app.products.is_empty() {
        let empty = Paragraph::new("No products found")
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Products "),
            );
        f.render_widget(empty, chunks[1]);
        return;
    }

    let header_cells = [
        "ID",
        "Name",
        "Brand",
        "Category",
        "Subcategory",
        "Price",
        "Qty",
        "Status",
    ]
    .iter()
    .map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.products.iter().map(|product| {
        let status = product.status();
        let status_color = match status {
            StockStatus::LowStock => Color::Red,
            StockStatus::InStock => Color::Green,
        };

        let cells = vec![
            Cell::from(product.id.to_string()),
            Cell::from(truncate(&product.name, 28)),
            Cell::from(truncate(product.brand_display(), 16)),
            Cell::from(truncate(&product.category, 18)),
            Cell::from(truncate(product.subcategory_display(), 18)),
            Cell::from(product.price_display()),
            Cell::from(product.quantity.to_string()),
            Cell::from(status.label()).style(Style::default().fg(status_color)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(30),
            Constraint::Length(18),
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Products "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    let mut state = TableState::default();
    state.select(app.selected);
    f.render_stateful_widget(table, chunks[1], &mut state);
}

fn render_filter_bar<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
    let search_style = if app.searching {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if app.searching {
        format!("{}▏", app.filters.search)
    } else if app.filters.search.is_empty() {
        "-".to_string()
    } else {
        app.filters.search.clone()
    };

    let spans = vec![
        Span::styled(" Search: ", Style::default().fg(Color::Cyan)),
        Span::styled(search_text, search_style),
        Span::raw("  |  "),
        Span::styled("Category: ", Style::default().fg(Color::Cyan)),
        Span::raw(app.filters.category.label().to_string()),
        Span::raw("  |  "),
        Span::styled("Subcategory: ", Style::default().fg(Color::Cyan)),
        Span::raw(app.filters.subcategory.label().to_string()),
        Span::raw("  |  "),
        Span::styled("Brand: ", Style::default().fg(Color::Cyan)),
        Span::raw(app.filters.brand.label().to_string()),
    ];

    let bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Filters "),
    );

    f.render_widget(bar, area);
}

fn render_stock<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_stock_form(
        f,
        chunks[0],
        app,
        &app.stock_in_form,
        StockSide::In,
        app.stock_focus == StockSide::In,
    );
    render_stock_form(
        f,
        chunks[1],
        app,
        &app.stock_out_form,
        StockSide::Out,
        app.stock_focus == StockSide::Out,
    );
}

fn render_stock_form<G: Gateway>(
    f: &mut Frame,
    area: Rect,
    app: &App<G>,
    form: &StockForm,
    side: StockSide,
    active: bool,
) {
    let product_label = form
        .selected
        .and_then(|i| app.picker_products.get(i))
        .map(Product::picker_label)
        .unwrap_or_else(|| "Select Product".to_string());

    let field_style = |index: usize| {
        if active && form.focus == index {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let marker = |index: usize| {
        if active && form.focus == index {
            "→ "
        } else {
            "  "
        }
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(marker(0)),
            Span::styled("Product:  ", Style::default().fg(Color::Cyan)),
            Span::styled(product_label, field_style(0)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(marker(1)),
            Span::styled("Quantity: ", Style::default().fg(Color::Cyan)),
            Span::styled(form.quantity.clone(), field_style(1)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(marker(2)),
            Span::styled("Notes:    ", Style::default().fg(Color::Cyan)),
            Span::styled(form.notes.clone(), field_style(2)),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Enter to submit",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]),
    ];

    let border_color = if active { Color::Yellow } else { Color::White };
    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", side.title())),
    );

    f.render_widget(panel, area);
}

fn render_monitoring<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Low Stock Alerts ");

    if app.alerts.is_empty() {
        let empty = Paragraph::new("No low stock alerts. All products are well stocked!")
            .style(Style::default().fg(Color::Green))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut content = vec![Line::from("")];
    for product in &app.alerts {
        content.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                product.name.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::raw(product.category.clone()),
            Span::raw("  "),
            Span::styled(product.price_display(), Style::default().fg(Color::Yellow)),
        ]));
        content.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(product.alert_detail(), Style::default().fg(Color::Red)),
        ]));
        content.push(Line::from(""));
    }

    let list = Paragraph::new(content).block(block);
    f.render_widget(list, area);
}

fn render_reports<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
    let Some(report) = &app.report else {
        let empty = Paragraph::new("No report data. Press 'r' to reload.")
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Reports "),
            );
        f.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let summary = Paragraph::new(vec![Line::from(vec![
        Span::styled(" Total Products: ", Style::default().fg(Color::Cyan)),
        Span::styled(
            report.total_products.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled("Inventory Value: ", Style::default().fg(Color::Cyan)),
        Span::styled(
            report.total_value_display(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled("Low Stock Items: ", Style::default().fg(Color::Cyan)),
        Span::styled(
            report.low_stock_count.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Summary "),
    );
    f.render_widget(summary, chunks[0]);

    let detail_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_category_table(f, detail_chunks[0], report);
    render_transaction_feed(f, detail_chunks[1], report);
}

fn render_category_table(f: &mut Frame, area: Rect, report: &crate::model::ReportSummary) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Stock by Category ");

    if report.category_stats.is_empty() {
        let empty = Paragraph::new("No category data available")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header_cells = ["Category", "Products", "Total Qty", "Total Value"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = report.category_stats.iter().map(|stat| {
        let cells = vec![
            Cell::from(truncate(&stat.category, 22)),
            Cell::from(stat.count.to_string()),
            Cell::from(stat.total_qty_display().to_string()),
            Cell::from(stat.total_value_display()).style(Style::default().fg(Color::Green)),
        ];
        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}

fn render_transaction_feed(f: &mut Frame, area: Rect, report: &crate::model::ReportSummary) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Recent Transactions ");

    if report.recent_transactions.is_empty() {
        let empty = Paragraph::new("No transactions yet")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut content = vec![Line::from("")];
    for tx in &report.recent_transactions {
        let color = if tx.is_inbound() {
            Color::Green
        } else {
            Color::Red
        };
        content.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(tx.direction_glyph(), Style::default().fg(color)),
            Span::raw(" "),
            Span::styled(
                tx.product_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} - {} units", tx.direction_label(), tx.quantity),
                Style::default().fg(color),
            ),
        ]));
        let mut detail = vec![
            Span::raw("    "),
            Span::styled(
                tx.created_at_display(),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if let Some(notes) = tx.notes.as_deref() {
            if !notes.is_empty() {
                detail.push(Span::raw("  "));
                detail.push(Span::styled(
                    truncate(notes, 40),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ));
            }
        }
        content.push(Line::from(detail));
    }

    let feed = Paragraph::new(content).block(block);
    f.render_widget(feed, area);
}

fn render_status_bar<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
    let hints: &[(&str, &str)] = if app.notice.is_some() {
        &[("any key", "Dismiss")]
    } else {
        match &app.modal {
            Modal::Confirm(_) => &[("y", "Confirm"), ("n", "Cancel")],
            Modal::AddProduct(_) | Modal::EditProduct(_) => {
                &[("↑/↓", "Field"), ("Enter", "Save"), ("Esc", "Cancel")]
            }
            Modal::None => match app.tab {
                Tab::Products => &[
                    ("/", "Search"),
                    ("c/v/b", "Filters"),
                    ("x", "Clear"),
                    ("a", "Add"),
                    ("e", "Edit"),
                    ("d", "Delete"),
                    ("1/2/3", "Seed/Dedupe/Wipe"),
                    ("Tab", "Page"),
                    ("q", "Quit"),
                ],
                Tab::Stock => &[
                    ("←/→", "Form"),
                    ("↑/↓", "Field"),
                    ("j/k", "Pick product"),
                    ("Enter", "Submit"),
                    ("Tab", "Page"),
                    ("Esc", "Quit"),
                ],
                Tab::Monitoring => &[("r", "Refresh"), ("Tab", "Page"), ("q", "Quit")],
                Tab::Reports => &[
                    ("r", "Refresh"),
                    ("e", "Export CSV"),
                    ("Tab", "Page"),
                    ("q", "Quit"),
                ],
            },
        }
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" "));
        spans.push(Span::raw(*label));
    }

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_form_popup(f: &mut Frame, title: &str, form: &crate::app::ProductForm) {
    let height = (form.field_count() as u16) * 2 + 4;
    let area = centered_rect(46, height, f.size());
    f.render_widget(Clear, area);

    let mut content = vec![Line::from("")];
    for (index, label) in form.labels().iter().enumerate() {
        let focused = form.focus == index;
        let marker = if focused { "→ " } else { "  " };
        let style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        content.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{label:<12}"), Style::default().fg(Color::Cyan)),
            Span::styled(form.value(index).to_string(), style),
        ]));
        content.push(Line::from(""));
    }
    content.push(Line::from(vec![Span::styled(
        "  Enter save / Esc cancel",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )]));

    let popup = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {title} ")),
    );

    f.render_widget(popup, area);
}

fn render_confirm_popup(f: &mut Frame, action: &Confirm) {
    let area = centered_rect(56, 7, f.size());
    f.render_widget(Clear, area);

    let popup = Paragraph::new(action.prompt())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Confirm (y/n) "),
        );

    f.render_widget(popup, area);
}

fn render_notice_popup(f: &mut Frame, notice: &Notice) {
    let area = centered_rect(56, 6, f.size());
    f.render_widget(Clear, area);

    let (title, color) = match notice.kind {
        NoticeKind::Info => (" Notice ", Color::Green),
        NoticeKind::Error => (" Error ", Color::Red),
    };

    let popup = Paragraph::new(notice.text.clone())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );

    f.render_widget(popup, area);
}

/// Centered popup area with a fixed size, clamped to the frame.
fn centered_rect(width: u16, height: u16, frame: Rect) -> Rect {
    let width = width.min(frame.width);
    let height = height.min(frame.height);
    let x = frame.x + (frame.width - width) / 2;
    let y = frame.y + (frame.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long product name", 10), "a very ...");
    }

    #[test]
    fn test_centered_rect_fits_frame() {
        let frame = Rect::new(0, 0, 80, 24);
        let area = centered_rect(40, 10, frame);
        assert_eq!(area.width, 40);
        assert_eq!(area.height, 10);
        assert_eq!(area.x, 20);
        assert_eq!(area.y, 7);

        let tiny = centered_rect(100, 100, frame);
        assert_eq!(tiny.width, 80);
        assert_eq!(tiny.height, 24);
    }
}
