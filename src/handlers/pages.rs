use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Lingo Portal</title>
    <style>
        body {
            margin: 0;
            padding: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            background: linear-gradient(135deg, #eff6ff 0%, #e0e7ff 100%);
            min-height: 100vh;
            display: flex;
            flex-direction: column;
        }
        header {
            padding: 16px;
            display: flex;
            justify-content: flex-end;
        }
        main {
            flex: 1;
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: center;
            gap: 32px;
            padding: 32px;
        }
        h1 {
            color: #1F2937;
            font-size: 40px;
            margin: 0 0 8px 0;
            text-align: center;
        }
        .subtitle {
            color: #6B7280;
            font-size: 20px;
            margin: 0;
            text-align: center;
        }
        .card {
            background: white;
            border-radius: 12px;
            padding: 24px;
            box-shadow: 0 8px 32px rgba(0, 0, 0, 0.1);
            width: 100%;
            max-width: 560px;
        }
        .card h2 {
            color: #1F2937;
            font-size: 22px;
            margin: 0 0 16px 0;
        }
        .status-ok { color: #10B981; }
        .status-error { color: #EF4444; }
        .muted { color: #9CA3AF; font-size: 14px; }
        .user { display: flex; align-items: center; gap: 12px; }
        .user img { width: 32px; height: 32px; border-radius: 50%; }
        a.button, button {
            padding: 8px 16px;
            background: #2563EB;
            color: white;
            border: none;
            border-radius: 8px;
            font-size: 14px;
            text-decoration: none;
            cursor: pointer;
        }
    </style>
</head>
<body>
    <header><div id="user-menu"></div></header>
    <main>
        <div>
            <h1>Language Learning Service</h1>
            <p class="subtitle">Welcome to Lingo Portal</p>
        </div>
        <div class="card">
            <h2>Backend Connection Status</h2>
            <div id="health" class="muted">Checking backend connection...</div>
        </div>
    </main>
    <script>
        fetch('/api/health')
            .then(function (response) { return response.json(); })
            .then(function (data) {
                var el = document.getElementById('health');
                if (data.status === 'error') {
                    el.className = 'status-error';
                    el.textContent = data.message || 'Backend unavailable';
                } else {
                    el.className = 'status-ok';
                    el.textContent = 'Connected (' + data.status + ') at ' + data.timestamp;
                }
            })
            .catch(function () {
                var el = document.getElementById('health');
                el.className = 'status-error';
                el.textContent = 'Failed to reach the portal';
            });

        fetch('/auth/session')
            .then(function (response) { return response.json(); })
            .then(function (session) {
                var menu = document.getElementById('user-menu');
                if (!session.user) {
                    menu.innerHTML = '<a class="button" href="/login">Sign in</a>';
                    return;
                }
                var user = session.user;
                menu.innerHTML =
                    '<div class="user">' +
                    (user.image ? '<img src="' + user.image + '" alt="">' : '') +
                    '<span>' + (user.name || user.email || user.id) + '</span>' +
                    '<form method="post" action="/auth/signout"><button>Sign out</button></form>' +
                    '</div>';
            });
    </script>
</body>
</html>"#;

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Sign in - Lingo Portal</title>
    <style>
        body {
            margin: 0;
            padding: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            background: linear-gradient(135deg, #eff6ff 0%, #e0e7ff 100%);
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
        }
        .container {
            background: white;
            border-radius: 12px;
            padding: 48px;
            box-shadow: 0 8px 32px rgba(0, 0, 0, 0.1);
            text-align: center;
            max-width: 400px;
        }
        h1 {
            color: #1F2937;
            margin: 0 0 24px 0;
            font-size: 24px;
        }
        .provider {
            display: block;
            margin: 12px 0;
            padding: 12px 24px;
            border-radius: 8px;
            color: white;
            font-weight: 600;
            text-decoration: none;
        }
        .google { background: #2563EB; }
        .naver { background: #03C75A; }
        .error {
            display: none;
            background: #FEE2E2;
            border-radius: 8px;
            padding: 16px;
            color: #991B1B;
            font-size: 14px;
            margin-bottom: 24px;
        }
        .footer { color: #9CA3AF; font-size: 14px; margin-top: 24px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Sign in to Lingo Portal</h1>
        <div id="error" class="error"></div>
        <a class="provider google" href="/auth/signin/google">Continue with Google</a>
        <a class="provider naver" href="/auth/signin/naver">Continue with Naver</a>
        <div class="footer"><a href="/">Back to home</a></div>
    </div>
    <script>
        var error = new URLSearchParams(window.location.search).get('error');
        if (error) {
            var el = document.getElementById('error');
            el.textContent = 'Sign-in failed: ' + error;
            el.style.display = 'block';
        }
    </script>
</body>
</html>"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_HTML)
}
