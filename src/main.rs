use iced_todo::Config;
use iced_todo::app::App;

fn main() -> iced::Result {
    let config = Config::from_env();
    iced_todo::logging::init(&config.log_filter);

    iced::application(move || App::new(config.clone()), App::update, App::view)
        .title("To-Do List")
        .run()
}
