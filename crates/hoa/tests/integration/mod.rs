mod branding_flow;
mod harvest_flow;
mod preview_fetch;
