//! templates.rs
//! Páginas HTML del servidor (inicio e historial).

use crate::models::history_model::PrintHistoryRecord;
use crate::services::upload_service::{ALLOWED_EXTENSIONS, MAX_COPIES, MIN_COPIES};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 860px; padding: 1.5rem; color: #222; }
header { display: flex; justify-content: space-between; align-items: center; }
table { width: 100%; border-collapse: collapse; margin-top: 1rem; }
th, td { text-align: left; padding: .4rem .5rem; border-bottom: 1px solid #ddd; font-size: .9rem; }
.status-completed { color: #1a7f37; } .status-failed { color: #cf222e; } .status-pending, .status-printing { color: #9a6700; }
.card { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-top: 1rem; }
#printer-status { font-weight: 600; }
"#;

/// Escapa texto para insertarlo en HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
        STYLE = STYLE,
        body = body
    )
}

fn format_size(size: Option<i64>) -> String {
    match size {
        None => "-".to_string(),
        Some(b) if b < 1024 => format!("{} B", b),
        Some(b) if b < 1024 * 1024 => format!("{:.1} KB", b as f64 / 1024.0),
        Some(b) => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
    }
}

fn history_rows(records: &[PrintHistoryRecord]) -> String {
    if records.is_empty() {
        return r#"<tr><td colspan="6">No print jobs yet.</td></tr>"#.to_string();
    }
    records
        .iter()
        .map(|r| {
            format!(
                r#"<tr><td>{ts}</td><td>{name}</td><td class="status-{status}">{status}</td><td>{copies}</td><td>{size}</td><td>{error}</td></tr>"#,
                ts = r.timestamp.format("%Y-%m-%d %H:%M:%S"),
                name = escape_html(&r.filename),
                status = r.status,
                copies = r.copies,
                size = format_size(r.file_size),
                error = escape_html(r.error_message.as_deref().unwrap_or("")),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn history_table(records: &[PrintHistoryRecord]) -> String {
    format!(
        r#"<table>
<thead><tr><th>Time</th><th>File</th><th>Status</th><th>Copies</th><th>Size</th><th>Error</th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#,
        rows = history_rows(records)
    )
}

/// Página principal: formulario + últimos registros.
pub fn render_home(printer_name: &str, recent: &[PrintHistoryRecord]) -> String {
    let accept: Vec<String> = ALLOWED_EXTENSIONS.iter().map(|e| format!(".{}", e)).collect();
    let body = format!(
        r#"<header>
  <h1>{printer}</h1>
  <img src="/qr-code/" alt="QR code for this page" width="120" height="120">
</header>
<p>Status: <span id="printer-status">checking…</span> <button type="button" id="test-print">Print test page</button></p>

<div class="card">
  <form id="upload-form" action="/upload/" method="post" enctype="multipart/form-data">
    <label>Select file to print
      <input type="file" name="file" accept="{accept}" required>
    </label>
    <small>Supported formats: PDF, PNG, JPG, TXT, DOCX (max 10MB)</small>
    <label>Number of copies
      <input type="number" name="copies" value="1" min="{min}" max="{max}">
    </label>
    <button type="submit">Print</button>
  </form>
  <p id="upload-result"></p>
</div>

<h2>Recent prints</h2>
{table}
<p><a href="/history/">Full history</a></p>

<script>
async function refreshStatus() {{
  try {{
    const r = await fetch('/api/printer-status/');
    const s = await r.json();
    document.getElementById('printer-status').textContent = s.status + ' - ' + s.message;
  }} catch (e) {{
    document.getElementById('printer-status').textContent = 'unknown';
  }}
}}
document.getElementById('test-print').addEventListener('click', async () => {{
  const r = await fetch('/api/test-print/');
  const j = await r.json();
  document.getElementById('upload-result').textContent = j.message;
}});
document.getElementById('upload-form').addEventListener('submit', async (ev) => {{
  ev.preventDefault();
  const res = await fetch('/upload/', {{
    method: 'POST',
    body: new FormData(ev.target),
    headers: {{ 'X-Requested-With': 'XMLHttpRequest' }},
  }});
  const j = await res.json();
  let text = j.message;
  if (j.errors) {{ text += ': ' + Object.values(j.errors).flat().join(' '); }}
  document.getElementById('upload-result').textContent = text;
  if (res.ok) {{ setTimeout(() => location.reload(), 1200); }}
}});
refreshStatus();
setInterval(refreshStatus, 10000);
</script>"#,
        printer = escape_html(printer_name),
        accept = accept.join(","),
        min = MIN_COPIES,
        max = MAX_COPIES,
        table = history_table(recent),
    );
    layout(&format!("Print to {}", printer_name), &body)
}

/// Página de historial completo.
pub fn render_history(printer_name: &str, records: &[PrintHistoryRecord]) -> String {
    let body = format!(
        r#"<header><h1>Print history</h1><a href="/">Back</a></header>
<p>Printer: {printer}</p>
{table}"#,
        printer = escape_html(printer_name),
        table = history_table(records),
    );
    layout("Print history", &body)
}
