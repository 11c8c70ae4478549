mod checkout_branch;
mod checkout_file;
mod reset_branch;
