//! The embedded dashboard page
//!
//! A single static page that drives the JSON API: it kicks off a screen on
//! load, renders one header and symbol dropdown per sector, and plots the
//! selected symbol as a candlestick chart with the two moving-average
//! overlays. Charting is delegated to Plotly loaded from its CDN.

use axum::response::Html;

/// GET / - serve the dashboard page
pub async fn dashboard_handler() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

const DASHBOARD_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Sector Screen</title>
<script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
<style>
  body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; color: #222; }
  h1 { margin-bottom: 0.25rem; }
  h2 { margin: 1rem 0 0.25rem; font-size: 1.1rem; }
  #status { color: #555; margin-bottom: 1rem; }
  .warning { color: #a15c00; background: #fff4e0; padding: 0.3rem 0.6rem; border-radius: 4px; margin: 0.2rem 0; }
  select { min-width: 16rem; padding: 0.2rem; }
  #chart { margin-top: 1.5rem; }
</style>
</head>
<body>
<h1>Sector Screen</h1>
<div id="status">Running screen&hellip;</div>
<div id="warnings"></div>
<div id="sectors"></div>
<div id="chart"></div>
<script>
async function loadScreen() {
  const status = document.getElementById('status');
  try {
    const response = await fetch('/api/screen');
    if (!response.ok) {
      const body = await response.json().catch(() => ({}));
      status.textContent = 'Screen failed: ' + (body.error || response.status);
      return;
    }
    const report = await response.json();
    status.textContent = 'Evaluated ' + report.evaluated + ' symbols, '
      + report.passed + ' passed (' + report.elapsed_ms + ' ms)';

    const warnings = document.getElementById('warnings');
    for (const diag of report.diagnostics) {
      const div = document.createElement('div');
      div.className = 'warning';
      div.textContent = diag;
      warnings.appendChild(div);
    }

    const sectors = document.getElementById('sectors');
    for (const group of report.sectors) {
      const header = document.createElement('h2');
      header.textContent = group.sector;
      sectors.appendChild(header);

      const select = document.createElement('select');
      const placeholder = document.createElement('option');
      placeholder.textContent = 'Select a symbol (' + group.symbols.length + ' passing)';
      placeholder.value = '';
      select.appendChild(placeholder);
      for (const entry of group.symbols) {
        const option = document.createElement('option');
        option.value = entry.symbol;
        option.textContent = entry.name ? entry.symbol + ' - ' + entry.name : entry.symbol;
        select.appendChild(option);
      }
      select.addEventListener('change', () => {
        if (select.value) loadChart(select.value);
      });
      sectors.appendChild(select);
    }
  } catch (err) {
    status.textContent = 'Screen failed: ' + err;
  }
}

async function loadChart(symbol) {
  const response = await fetch('/api/chart/' + encodeURIComponent(symbol));
  if (!response.ok) {
    const body = await response.json().catch(() => ({}));
    alert('Chart failed: ' + (body.error || response.status));
    return;
  }
  const chart = await response.json();
  const dates = chart.candles.map(c => c.time);

  const traces = [
    {
      type: 'candlestick',
      name: chart.symbol,
      x: dates,
      open: chart.candles.map(c => c.open),
      high: chart.candles.map(c => c.high),
      low: chart.candles.map(c => c.low),
      close: chart.candles.map(c => c.close),
    },
    {
      type: 'scatter',
      mode: 'lines',
      name: 'MA' + chart.ma_slow_window,
      x: dates,
      y: chart.ma_slow,
    },
    {
      type: 'scatter',
      mode: 'lines',
      name: 'MA' + chart.ma_fast_window,
      x: dates,
      y: chart.ma_fast,
    },
  ];

  const layout = {
    title: chart.symbol,
    xaxis: { title: 'Date', rangeslider: { visible: false } },
    yaxis: { title: 'Price' },
  };

  Plotly.newPlot('chart', traces, layout);
}

loadScreen();
</script>
</body>
</html>
"#;
