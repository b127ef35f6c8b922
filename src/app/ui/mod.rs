mod details;
mod panels;
mod sidebar;
