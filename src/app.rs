//! Root application component with routing and the session context.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::access_guard::guarded;
use crate::components::navbar::Navbar;
use crate::config::ClientConfig;
use crate::pages::{
    books::{BookDetailPage, BookEditorPage, BookListPage},
    chatbot::ChatbotPage,
    home::HomePage,
    login::LoginPage,
    news::{NewsDetailPage, NewsEditorPage, NewsListPage},
    notifications::NotificationsPage,
    profile::ProfilePage,
    quiz_take::QuizTakePage,
    quizzes::{QuizDetailPage, QuizEditorPage, QuizListPage},
    register::RegisterPage,
    tasks::{TaskDetailPage, TaskEditorPage, TaskListPage},
    unauthorized::UnauthorizedPage,
};
use crate::state::guard::{ANY_ROLE, STAFF, STUDENTS};
use crate::state::session::AppSession;
use crate::util::task::spawn_ui;

/// Root application component.
///
/// Provides the session, starts restoring it from the stored token, and sets
/// up client-side routing. Static `create` segments are declared ahead of the
/// `:id` routes that would otherwise shadow them.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    log::info!("campus client using {}", config.api_base_url);
    let session = AppSession::browser(&config);
    provide_context(session.clone());
    spawn_ui(async move { session.restore().await });

    view! {
        <Title text="Campus"/>

        <Router>
            <Navbar/>
            <main class="page">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("unauthorized") view=UnauthorizedPage/>
                    <Route path=StaticSegment("profile") view=guarded(ProfilePage, ANY_ROLE)/>

                    <Route path=StaticSegment("books") view=BookListPage/>
                    <Route path=(StaticSegment("books"), StaticSegment("create")) view=guarded(BookEditorPage, STAFF)/>
                    <Route
                        path=(StaticSegment("books"), StaticSegment("edit"), ParamSegment("id"))
                        view=guarded(BookEditorPage, STAFF)
                    />
                    <Route path=(StaticSegment("books"), ParamSegment("id")) view=BookDetailPage/>

                    <Route path=StaticSegment("tasks") view=guarded(TaskListPage, ANY_ROLE)/>
                    <Route path=(StaticSegment("tasks"), StaticSegment("create")) view=guarded(TaskEditorPage, STAFF)/>
                    <Route
                        path=(StaticSegment("tasks"), StaticSegment("edit"), ParamSegment("id"))
                        view=guarded(TaskEditorPage, STAFF)
                    />
                    <Route path=(StaticSegment("tasks"), ParamSegment("id")) view=guarded(TaskDetailPage, ANY_ROLE)/>

                    <Route path=StaticSegment("news") view=NewsListPage/>
                    <Route path=(StaticSegment("news"), StaticSegment("create")) view=guarded(NewsEditorPage, STAFF)/>
                    <Route
                        path=(StaticSegment("news"), StaticSegment("edit"), ParamSegment("id"))
                        view=guarded(NewsEditorPage, STAFF)
                    />
                    <Route path=(StaticSegment("news"), ParamSegment("id")) view=NewsDetailPage/>

                    <Route path=StaticSegment("tests") view=guarded(QuizListPage, ANY_ROLE)/>
                    <Route path=(StaticSegment("tests"), StaticSegment("create")) view=guarded(QuizEditorPage, STAFF)/>
                    <Route
                        path=(StaticSegment("tests"), StaticSegment("edit"), ParamSegment("id"))
                        view=guarded(QuizEditorPage, STAFF)
                    />
                    <Route
                        path=(StaticSegment("tests"), StaticSegment("details"), ParamSegment("id"))
                        view=guarded(QuizDetailPage, ANY_ROLE)
                    />
                    <Route
                        path=(StaticSegment("tests"), StaticSegment("take"), ParamSegment("id"))
                        view=guarded(QuizTakePage, STUDENTS)
                    />

                    <Route path=StaticSegment("chatbot") view=guarded(ChatbotPage, ANY_ROLE)/>
                    <Route path=StaticSegment("notifications") view=guarded(NotificationsPage, ANY_ROLE)/>
                </Routes>
            </main>
        </Router>
    }
}
