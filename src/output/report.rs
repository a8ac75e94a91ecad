use crate::catalog::CATEGORY_ORDER;
use crate::controller::Controller;
use crate::model::{Insurer, POPIS_SEPARATOR};
use crate::table::{escape_html, EMPTY_CELL};

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

fn script_literal<T: serde::Serialize + ?Sized>(value: &T) -> String {
    let json = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
    json_for_script_tag(&json)
}

fn escape_attr(value: &str) -> String {
    escape_html(value).replace('"', "&quot;")
}

fn render_filter_options(controller: &Controller) -> String {
    let selected = controller.category();
    let mut out = String::from(r#"<option value="">Všetky kategórie</option>"#);
    for option in controller.categories().options() {
        let marker = if option.value == selected {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            "\n          <option value=\"{}\"{marker}>{}</option>",
            escape_attr(&option.value),
            escape_html(&option.label)
        ));
    }
    out
}

fn render_header_cells() -> String {
    let mut out = String::from("<th>Popis</th>");
    for insurer in Insurer::ALL {
        out.push_str(&format!("<th>{}</th>", escape_html(insurer.label())));
    }
    out
}

/// Standalone page with the category control, the search control and the
/// comparison table as they stand in `controller`.
pub fn render_html(controller: &Controller) -> Vec<u8> {
    let json = serde_json::to_string(controller.dataset().records())
        .unwrap_or_else(|_| "[]".to_string());
    let json = json_for_script_tag(&json);
    let options = render_filter_options(controller);
    let header = render_header_cells();
    let search = escape_attr(controller.search());
    let rows = controller.table().markup();
    let row_count = controller.table().len();
    let order = script_literal(&CATEGORY_ORDER);
    let insurers = script_literal(&Insurer::ALL.map(|i| i.label()));
    let separator = script_literal(POPIS_SEPARATOR);
    let empty_cell = script_literal(EMPTY_CELL);

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="sk">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Porovnanie benefitov poisťovní</title>
  <style>
    body {{
      font-family: 'Inter', sans-serif;
      margin: 0;
      background: #f8fafc;
      color: #0f172a;
    }}
    header {{
      padding: 1rem 2rem;
      border-bottom: 1px solid #e2e8f0;
      background: #ffffff;
    }}
    main {{
      max-width: 1440px;
      margin: 0 auto;
      padding: 2rem;
    }}
    .controls {{
      display: flex;
      gap: 1rem;
      margin-bottom: 1.5rem;
    }}
    table {{
      width: 100%;
      border-collapse: collapse;
      background: #ffffff;
    }}
    th, td {{
      border: 1px solid #e2e8f0;
      padding: 0.5rem 0.75rem;
      text-align: left;
      vertical-align: top;
    }}
    td ul {{
      margin: 0;
      padding-left: 1.25rem;
    }}
  </style>
</head>
<body>
  <script type="application/json" id="records-data">{json}</script>
  <header>
    <h2>Porovnanie benefitov poisťovní</h2>
  </header>
  <main>
    <div class="controls">
      <select id="filter">
          {options}
      </select>
      <input id="search" type="text" placeholder="Hľadať benefit..." value="{search}"/>
    </div>
    <p><span id="row-count">{row_count}</span> riadkov</p>
    <table id="comparisonTable">
      <thead><tr>{header}</tr></thead>
      <tbody>{rows}</tbody>
    </table>
  </main>

  <script>
    (function() {{
      const ORDER = {order};
      const INSURERS = {insurers};
      const SEPARATOR = {separator};
      const EMPTY_CELL = {empty_cell};

      function escapeHtml(value) {{
        return String(value)
          .replaceAll('&', '&amp;')
          .replaceAll('<', '&lt;')
          .replaceAll('>', '&gt;');
      }}

      function categoryOf(popis) {{
        const idx = popis.indexOf(SEPARATOR);
        return idx < 0 ? popis : popis.slice(0, idx);
      }}

      function groupRecords(items) {{
        const groups = new Map();
        for (const r of items) {{
          const popis = String(r.Popis || '');
          const poistovna = String(r.Poistovna || '');
          if (!groups.has(popis)) groups.set(popis, new Map());
          const byInsurer = groups.get(popis);
          if (!byInsurer.has(poistovna)) byInsurer.set(poistovna, []);
          byInsurer.get(poistovna).push(String(r.Benefit || ''));
        }}
        return groups;
      }}

      function cellMarkup(benefits) {{
        if (benefits.length === 0) return escapeHtml(EMPTY_CELL);
        return '<ul>' + benefits.map(function(b) {{ return '<li>' + escapeHtml(b) + '</li>'; }}).join('') + '</ul>';
      }}

      const raw = document.getElementById('records-data').textContent || '[]';
      const groups = groupRecords(JSON.parse(raw));
      const labels = Array.from(groups.keys());
      labels.sort(function(a, b) {{
        return ORDER.indexOf(categoryOf(a)) - ORDER.indexOf(categoryOf(b));
      }});

      const filterEl = document.getElementById('filter');
      const searchEl = document.getElementById('search');
      const tbody = document.querySelector('#comparisonTable tbody');
      const countEl = document.getElementById('row-count');

      function render() {{
        const category = filterEl.value || '';
        const query = searchEl.value || '';
        const needle = query.toLowerCase();
        tbody.innerHTML = '';
        let count = 0;
        for (const popis of labels) {{
          if (category && !popis.startsWith(category)) continue;
          const byInsurer = groups.get(popis);
          const tr = document.createElement('tr');
          let html = '<td>' + escapeHtml(popis) + '</td>';
          for (const insurer of INSURERS) {{
            const matching = (byInsurer.get(insurer) || []).filter(function(b) {{
              return b.toLowerCase().includes(needle);
            }});
            html += '<td>' + cellMarkup(matching) + '</td>';
          }}
          tr.innerHTML = html;
          if (query && !tr.innerHTML.toLowerCase().includes(needle)) continue;
          tbody.appendChild(tr);
          count += 1;
        }}
        countEl.textContent = String(count);
      }}

      filterEl.addEventListener('change', render);
      searchEl.addEventListener('input', render);
    }})();
  </script>
</body>
</html>
"####
    );

    html.into_bytes()
}
