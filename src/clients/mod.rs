pub mod mlb_page;
