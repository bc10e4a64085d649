pub mod daily_card;
pub mod matching_board;
pub mod menu;
pub mod progress_bar;
pub mod stats_panel;
pub mod typing_panel;
pub mod users_panel;
pub mod word_list;
