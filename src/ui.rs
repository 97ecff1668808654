use crate::app::Route;
use crate::models::{KpiResponse, Priority, Theme};

pub fn render_index(theme: Theme, kpis: &KpiResponse) -> String {
    let nav: String = Route::ALL
        .iter()
        .map(|route| {
            format!(
                r##"<a class="nav-link" href="#/{frag}" data-route="{frag}">{label}</a>"##,
                frag = route.fragment(),
                label = route.label()
            )
        })
        .collect();

    let priorities: String = Priority::ALL
        .iter()
        .map(|priority| {
            format!(
                r#"<option value="{value}"{selected}>{label}</option>"#,
                value = priority.value(),
                selected = if *priority == Priority::Medium {
                    " selected"
                } else {
                    ""
                },
                label = priority.label()
            )
        })
        .collect();

    INDEX_HTML
        .replace(
            "{{THEME}}",
            match theme {
                Theme::Dark => "dark",
                Theme::Light => "",
            },
        )
        .replace("{{NAV}}", &nav)
        .replace("{{PRIORITY_OPTIONS}}", &priorities)
        .replace("{{TODAY}}", &kpis.today.to_string())
        .replace("{{DONE}}", &kpis.done.to_string())
        .replace("{{ACTIVE}}", &kpis.active.to_string())
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en" class="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Taskboard</title>
  <style>
    :root {
      --bg: #f4f5f7;
      --surface: #ffffff;
      --ink: #1f2430;
      --muted: #6b7280;
      --line: #e3e6eb;
      --accent: #3b6ef6;
      --danger: #d64545;
      --ok: #2d8a57;
      --warn: #c98a1b;
    }

    html.dark {
      --bg: #161a22;
      --surface: #1f2430;
      --ink: #e8eaf0;
      --muted: #9aa2b1;
      --line: #2c3342;
      --accent: #6c93ff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      display: flex;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
    }

    .sidebar {
      width: 220px;
      flex-shrink: 0;
      background: var(--surface);
      border-left: none;
      border-right: 1px solid var(--line);
      padding: 20px 14px;
      display: flex;
      flex-direction: column;
      gap: 8px;
    }

    .sidebar h1 {
      font-size: 1.2rem;
      margin: 0 0 14px;
    }

    .nav-link {
      display: block;
      padding: 10px 12px;
      border-radius: 8px;
      color: var(--muted);
      text-decoration: none;
      font-weight: 600;
    }

    .nav-link.active {
      background: var(--accent);
      color: #fff;
    }

    .sidebar .spacer {
      flex: 1;
    }

    main {
      flex: 1;
      padding: 24px;
      max-width: 1100px;
    }

    .topbar {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 20px;
    }

    .view {
      display: none;
    }

    .view.active {
      display: block;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 14px;
      margin-bottom: 20px;
    }

    .card {
      background: var(--surface);
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 16px;
    }

    .card .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: var(--muted);
    }

    .card .value {
      font-size: 1.8rem;
      font-weight: 700;
    }

    .quote-box {
      margin-bottom: 20px;
    }

    .quote-box .error {
      color: var(--danger);
      font-size: 0.85rem;
      min-height: 1.1em;
    }

    form.row,
    .filters {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      margin-bottom: 16px;
    }

    input,
    select,
    textarea {
      background: var(--surface);
      color: var(--ink);
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 9px 10px;
      font-size: 0.95rem;
    }

    textarea {
      width: 100%;
      min-height: 70px;
      resize: vertical;
    }

    button {
      border: none;
      border-radius: 8px;
      padding: 9px 14px;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: #fff;
    }

    button.icon {
      background: transparent;
      color: inherit;
      padding: 4px 6px;
      font-size: 1rem;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: var(--surface);
      border: 1px solid var(--line);
      border-radius: 10px;
      overflow: hidden;
    }

    th,
    td {
      text-align: left;
      padding: 10px 12px;
      border-bottom: 1px solid var(--line);
      font-size: 0.95rem;
    }

    tr.done td.title-cell {
      text-decoration: line-through;
      color: var(--muted);
    }

    .badge {
      display: inline-block;
      padding: 2px 10px;
      border-radius: 999px;
      font-size: 0.8rem;
      font-weight: 600;
      color: #fff;
    }

    .badge.high {
      background: var(--danger);
    }

    .badge.medium {
      background: var(--warn);
    }

    .badge.low {
      background: var(--ok);
    }

    .quick-list {
      list-style: none;
      margin: 10px 0 0;
      padding: 0;
    }

    .quick-list li {
      padding: 8px 10px;
      border-bottom: 1px solid var(--line);
      cursor: pointer;
    }

    .quick-list li.done {
      text-decoration: line-through;
      color: var(--muted);
    }

    .notes-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
      gap: 14px;
    }

    .notes-grid .card h3 {
      margin: 0 0 8px;
    }

    .notes-grid .card p {
      margin: 0 0 10px;
      white-space: pre-wrap;
    }

    .note-footer {
      display: flex;
      align-items: center;
      justify-content: space-between;
      color: var(--muted);
      font-size: 0.8rem;
    }

    #menuToggle {
      display: none;
    }

    @media (max-width: 1024px) {
      #menuToggle {
        display: inline-block;
      }

      .sidebar {
        position: fixed;
        inset: 0 auto 0 0;
        z-index: 10;
      }

      .sidebar.hidden {
        display: none;
      }

      main {
        padding-top: 60px;
      }
    }
  </style>
</head>
<body>
  <nav class="sidebar hidden" id="sidebar">
    <h1>Taskboard</h1>
    {{NAV}}
    <div class="spacer"></div>
    <button id="themeToggle" type="button">Toggle theme</button>
  </nav>

  <main>
    <div class="topbar">
      <button id="menuToggle" type="button">Menu</button>
    </div>

    <section class="view" id="view-dashboard">
      <div class="cards">
        <div class="card">
          <span class="label">Due today</span>
          <span class="value" id="kpi-today">{{TODAY}}</span>
        </div>
        <div class="card">
          <span class="label">Done</span>
          <span class="value" id="kpi-done">{{DONE}}</span>
        </div>
        <div class="card">
          <span class="label">Active</span>
          <span class="value" id="kpi-active">{{ACTIVE}}</span>
        </div>
      </div>

      <div class="card quote-box">
        <p id="quote">Loading quote...</p>
        <div class="error" id="quoteError"></div>
        <button id="refreshQuote" type="button">New quote</button>
      </div>

      <div class="card">
        <form class="row" id="quickAddForm">
          <input id="quickTitle" placeholder="Quick task..." />
          <select id="quickPriority">
            {{PRIORITY_OPTIONS}}
          </select>
          <button type="submit">Add</button>
        </form>
        <ul class="quick-list" id="quickList"></ul>
      </div>
    </section>

    <section class="view" id="view-tasks">
      <form class="row" id="taskForm">
        <input id="taskTitle" placeholder="Task title" required />
        <input id="taskDate" type="date" />
        <select id="taskPriority">
          {{PRIORITY_OPTIONS}}
        </select>
        <input id="taskDesc" placeholder="Description" />
        <button type="submit">Add task</button>
      </form>

      <div class="filters">
        <select id="filterStatus">
          <option value="all" selected>All</option>
          <option value="done">Done</option>
          <option value="pending">Pending</option>
        </select>
        <select id="filterPriority">
          <option value="all" selected>Any priority</option>
          <option value="high">High</option>
          <option value="medium">Medium</option>
          <option value="low">Low</option>
        </select>
        <input id="searchTask" placeholder="Search..." />
      </div>

      <table id="taskTable">
        <thead>
          <tr>
            <th></th>
            <th>Title</th>
            <th>Priority</th>
            <th>Date</th>
            <th></th>
          </tr>
        </thead>
        <tbody></tbody>
      </table>
    </section>

    <section class="view" id="view-notes">
      <form id="noteForm">
        <div class="row" style="display:flex;gap:8px;margin-bottom:8px;">
          <input id="noteTitle" placeholder="Note title" required style="flex:1;" />
          <button type="submit">Add note</button>
        </div>
        <textarea id="noteBody" placeholder="Write something..."></textarea>
      </form>
      <div class="notes-grid" id="notesGrid" style="margin-top:16px;"></div>
    </section>
  </main>

  <script>
    const sidebar = document.getElementById('sidebar');
    const themeToggle = document.getElementById('themeToggle');
    const menuToggle = document.getElementById('menuToggle');
    const views = {
      dashboard: document.getElementById('view-dashboard'),
      tasks: document.getElementById('view-tasks'),
      notes: document.getElementById('view-notes'),
    };

    const kpiToday = document.getElementById('kpi-today');
    const kpiDone = document.getElementById('kpi-done');
    const kpiActive = document.getElementById('kpi-active');
    const quoteEl = document.getElementById('quote');
    const quoteError = document.getElementById('quoteError');
    const refreshQuote = document.getElementById('refreshQuote');

    const quickForm = document.getElementById('quickAddForm');
    const quickTitle = document.getElementById('quickTitle');
    const quickPriority = document.getElementById('quickPriority');
    const quickList = document.getElementById('quickList');

    const taskForm = document.getElementById('taskForm');
    const taskTitle = document.getElementById('taskTitle');
    const taskDate = document.getElementById('taskDate');
    const taskPriority = document.getElementById('taskPriority');
    const taskDesc = document.getElementById('taskDesc');
    const filterStatus = document.getElementById('filterStatus');
    const filterPriority = document.getElementById('filterPriority');
    const searchTask = document.getElementById('searchTask');
    const taskTableBody = document.querySelector('#taskTable tbody');

    const noteForm = document.getElementById('noteForm');
    const noteTitle = document.getElementById('noteTitle');
    const noteBody = document.getElementById('noteBody');
    const notesGrid = document.getElementById('notesGrid');

    let allTasks = [];

    const setKpis = (kpis) => {
      kpiToday.textContent = kpis.today;
      kpiDone.textContent = kpis.done;
      kpiActive.textContent = kpis.active;
    };

    // ----- Router -----
    const setActiveRoute = (route) => {
      Object.values(views).forEach((view) => view.classList.remove('active'));
      document.querySelectorAll('.nav-link').forEach((a) => a.classList.remove('active'));
      const target = views[route] ?? views.dashboard;
      target.classList.add('active');
      const link = document.querySelector(`.nav-link[data-route="${route}"]`)
        ?? document.querySelector('.nav-link[data-route="dashboard"]');
      link.classList.add('active');
      sidebar.classList.remove('show');
      if (window.innerWidth <= 1024) sidebar.classList.add('hidden');
      refreshKpis();
    };

    const handleHashChange = () => {
      const route = location.hash.replace('#/', '') || 'dashboard';
      setActiveRoute(route);
    };
    window.addEventListener('hashchange', handleHashChange);

    menuToggle.addEventListener('click', () => {
      sidebar.classList.toggle('show');
      sidebar.classList.toggle('hidden');
    });

    // ----- Theme -----
    themeToggle.addEventListener('click', async () => {
      const next = document.documentElement.classList.contains('dark') ? 'light' : 'dark';
      document.documentElement.classList.toggle('dark', next === 'dark');
      await fetch('/api/theme', {
        method: 'PUT',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ theme: next }),
      });
    });

    // ----- Quote -----
    const loadQuote = async () => {
      quoteError.textContent = '';
      quoteEl.textContent = 'Loading quote...';
      try {
        const res = await fetch('/api/quote');
        if (!res.ok) throw new Error(await res.text());
        const data = await res.json();
        quoteEl.textContent = `“${data.content}” — ${data.author}`;
      } catch (err) {
        quoteEl.textContent = 'Could not load a quote.';
        quoteError.textContent = err.message;
      }
    };
    refreshQuote.addEventListener('click', loadQuote);

    // ----- Tasks -----
    const loadTasks = async () => {
      const params = new URLSearchParams();
      if (filterStatus.value !== 'all') params.set('status', filterStatus.value);
      if (filterPriority.value !== 'all') params.set('priority', filterPriority.value);
      const q = searchTask.value.trim();
      if (q) params.set('q', q);

      const res = await fetch(`/api/tasks?${params}`);
      if (!res.ok) return;
      renderTasks(await res.json());

      const all = await fetch('/api/tasks');
      if (all.ok) {
        allTasks = await all.json();
        renderQuick();
      }
    };

    const refreshKpis = async () => {
      const res = await fetch('/api/kpis');
      if (res.ok) setKpis(await res.json());
    };

    const renderTasks = (tasks) => {
      taskTableBody.innerHTML = '';
      tasks.forEach((t) => {
        const tr = document.createElement('tr');
        if (t.done) tr.classList.add('done');

        const statusTd = document.createElement('td');
        const toggleBtn = document.createElement('button');
        toggleBtn.className = 'icon';
        toggleBtn.title = 'Toggle done';
        toggleBtn.textContent = t.done ? '✅' : '⏳';
        toggleBtn.addEventListener('click', async () => {
          const res = await fetch(`/api/tasks/${t.id}/toggle`, { method: 'POST' });
          if (res.ok) setKpis(await res.json());
          loadTasks();
        });
        statusTd.appendChild(toggleBtn);

        const titleTd = document.createElement('td');
        titleTd.className = 'title-cell';
        titleTd.textContent = t.title;

        const prTd = document.createElement('td');
        const badge = document.createElement('span');
        badge.className = `badge ${t.priority}`;
        badge.textContent = t.priority === 'high' ? 'High' : t.priority === 'medium' ? 'Medium' : 'Low';
        prTd.appendChild(badge);

        const dateTd = document.createElement('td');
        dateTd.textContent = t.date || '—';

        const actionsTd = document.createElement('td');
        const editBtn = document.createElement('button');
        editBtn.className = 'icon';
        editBtn.textContent = '✏️';
        editBtn.title = 'Edit';
        editBtn.addEventListener('click', () => editTaskPrompt(t));

        const delBtn = document.createElement('button');
        delBtn.className = 'icon';
        delBtn.textContent = '\u{1F5D1}️';
        delBtn.title = 'Delete';
        delBtn.addEventListener('click', async () => {
          if (!confirm('Delete this task?')) return;
          const res = await fetch(`/api/tasks/${t.id}`, { method: 'DELETE' });
          if (res.ok) setKpis(await res.json());
          loadTasks();
        });

        actionsTd.append(editBtn, delBtn);
        tr.append(statusTd, titleTd, prTd, dateTd, actionsTd);
        taskTableBody.appendChild(tr);
      });
    };

    // A cancelled prompt leaves that field out of the patch; the server
    // keeps the existing value.
    const editTaskPrompt = async (t) => {
      const patch = {};
      const newTitle = prompt('New title:', t.title);
      if (newTitle !== null) patch.title = newTitle;
      const newDate = prompt('Date (YYYY-MM-DD):', t.date);
      if (newDate !== null) patch.date = newDate;
      const newPriority = prompt('Priority (high|medium|low):', t.priority);
      if (newPriority !== null && ['high', 'medium', 'low'].includes(newPriority)) {
        patch.priority = newPriority;
      }
      const newDesc = prompt('Description:', t.description);
      if (newDesc !== null) patch.description = newDesc;

      const res = await fetch(`/api/tasks/${t.id}`, {
        method: 'PATCH',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(patch),
      });
      if (res.ok) setKpis(await res.json());
      loadTasks();
    };

    const addTask = async (task) => {
      const res = await fetch('/api/tasks', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(task),
      });
      if (res.ok) {
        await loadTasks();
        await refreshKpis();
      }
    };

    taskForm.addEventListener('submit', (event) => {
      event.preventDefault();
      addTask({
        title: taskTitle.value,
        date: taskDate.value,
        priority: taskPriority.value,
        description: taskDesc.value,
      });
      taskForm.reset();
    });

    [filterStatus, filterPriority, searchTask].forEach((el) =>
      el.addEventListener('input', loadTasks)
    );

    // ----- Quick add -----
    quickForm.addEventListener('submit', (event) => {
      event.preventDefault();
      if (!quickTitle.value.trim()) return;
      addTask({ title: quickTitle.value, date: '', priority: quickPriority.value, description: '' });
      quickTitle.value = '';
    });

    const renderQuick = () => {
      quickList.innerHTML = '';
      const last = [...allTasks].slice(-5).reverse();
      last.forEach((t) => {
        const li = document.createElement('li');
        li.textContent = t.title;
        if (t.done) li.classList.add('done');
        li.addEventListener('click', async () => {
          const res = await fetch(`/api/tasks/${t.id}/toggle`, { method: 'POST' });
          if (res.ok) setKpis(await res.json());
          loadTasks();
        });
        quickList.appendChild(li);
      });
    };

    // ----- Notes -----
    const loadNotes = async () => {
      const res = await fetch('/api/notes');
      if (res.ok) renderNotes(await res.json());
    };

    const renderNotes = (notes) => {
      notesGrid.innerHTML = '';
      if (notes.length === 0) {
        const p = document.createElement('p');
        p.textContent = 'No notes yet.';
        notesGrid.appendChild(p);
        return;
      }
      notes.forEach((n) => {
        const card = document.createElement('div');
        card.className = 'card';
        const title = document.createElement('h3');
        title.textContent = n.title;
        const body = document.createElement('p');
        body.textContent = n.body;
        const footer = document.createElement('div');
        footer.className = 'note-footer';
        const time = document.createElement('small');
        time.textContent = new Date(n.created_at).toLocaleString();
        const del = document.createElement('button');
        del.className = 'icon';
        del.textContent = '\u{1F5D1}️';
        del.title = 'Delete note';
        del.addEventListener('click', async () => {
          if (!confirm('Delete this note?')) return;
          await fetch(`/api/notes/${n.id}`, { method: 'DELETE' });
          loadNotes();
        });
        footer.append(time, del);
        card.append(title, body, footer);
        notesGrid.appendChild(card);
      });
    };

    noteForm.addEventListener('submit', async (event) => {
      event.preventDefault();
      await fetch('/api/notes', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ title: noteTitle.value, body: noteBody.value }),
      });
      noteForm.reset();
      loadNotes();
    });

    // ----- Init -----
    handleHashChange();
    loadQuote();
    loadTasks();
    loadNotes();
  </script>
</body>
</html>
"##;
